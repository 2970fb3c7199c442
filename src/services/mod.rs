pub mod auth;
pub mod fashion;
pub mod outfits;
pub mod recommendations;
pub mod wardrobe;
pub mod weather;
