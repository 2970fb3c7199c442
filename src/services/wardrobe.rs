use uuid::Uuid;

use crate::{
    db::ClothingRepository,
    error::{AppError, AppResult},
    models::{ClothingAttributes, ClothingItem},
};

/// Adds an item to `owner`'s wardrobe
pub async fn create_item(
    repo: &dyn ClothingRepository,
    owner: Uuid,
    attributes: ClothingAttributes,
) -> AppResult<ClothingItem> {
    let item = ClothingItem::new(owner, attributes);
    item.validate()?;

    let item = repo.create(item).await?;
    tracing::info!(user_id = %owner, item_id = %item.id, "Clothing item created");
    Ok(item)
}

/// Lists `owner`'s wardrobe, oldest first
pub async fn list_items(repo: &dyn ClothingRepository, owner: Uuid) -> AppResult<Vec<ClothingItem>> {
    repo.list_by_user(owner).await
}

/// Fetches an item, requiring that `owner` owns it
pub async fn get_item(
    repo: &dyn ClothingRepository,
    owner: Uuid,
    id: Uuid,
) -> AppResult<ClothingItem> {
    let item = repo.get_by_id(id).await?;
    ensure_owner(&item, owner)?;
    Ok(item)
}

pub async fn update_item(
    repo: &dyn ClothingRepository,
    owner: Uuid,
    id: Uuid,
    attributes: ClothingAttributes,
) -> AppResult<ClothingItem> {
    let mut item = get_item(repo, owner, id).await?;
    item.apply(attributes);
    item.validate()?;

    let item = repo.update(item).await?;
    tracing::info!(user_id = %owner, item_id = %id, "Clothing item updated");
    Ok(item)
}

pub async fn delete_item(repo: &dyn ClothingRepository, owner: Uuid, id: Uuid) -> AppResult<()> {
    get_item(repo, owner, id).await?;
    repo.delete(id).await?;
    tracing::info!(user_id = %owner, item_id = %id, "Clothing item deleted");
    Ok(())
}

fn ensure_owner(item: &ClothingItem, owner: Uuid) -> AppResult<()> {
    if item.user_id != owner {
        return Err(AppError::Forbidden(
            "this clothing item belongs to another user".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryClothingRepository;
    use crate::models::{ClothingCategory, GarmentKind};

    fn attributes(name: &str) -> ClothingAttributes {
        ClothingAttributes {
            name: name.to_string(),
            category: ClothingCategory::Outerwear,
            kinds: vec![GarmentKind::Raincoat],
            color: "yellow".to_string(),
            brand: Some("Stutterheim".to_string()),
            warmth_level: Some(4),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let repo = InMemoryClothingRepository::new();
        let owner = Uuid::new_v4();
        let item = create_item(&repo, owner, attributes("Raincoat")).await.unwrap();

        let items = list_items(&repo, owner).await.unwrap();
        assert_eq!(items, vec![item]);
        assert!(list_items(&repo, Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_item() {
        let repo = InMemoryClothingRepository::new();
        let mut attrs = attributes("Raincoat");
        attrs.color = String::new();
        let result = create_item(&repo, Uuid::new_v4(), attrs).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_other_users_cannot_touch_item() {
        let repo = InMemoryClothingRepository::new();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let item = create_item(&repo, owner, attributes("Raincoat")).await.unwrap();

        assert!(matches!(
            get_item(&repo, intruder, item.id).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            update_item(&repo, intruder, item.id, attributes("Mine now")).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            delete_item(&repo, intruder, item.id).await,
            Err(AppError::Forbidden(_))
        ));
        assert_eq!(get_item(&repo, owner, item.id).await.unwrap().name, "Raincoat");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = InMemoryClothingRepository::new();
        let owner = Uuid::new_v4();
        let item = create_item(&repo, owner, attributes("Raincoat")).await.unwrap();

        let updated = update_item(&repo, owner, item.id, attributes("Poncho"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Poncho");
        assert_eq!(updated.created_at, item.created_at);

        delete_item(&repo, owner, item.id).await.unwrap();
        assert!(matches!(
            get_item(&repo, owner, item.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
