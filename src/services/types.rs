use crate::domain::product_type::ProductType;
use crate::repository::TypeReader;
use crate::services::ServiceResult;

/// Every product type known to the catalog, in creation order.
pub fn list_types<R>(repo: &R) -> ServiceResult<Vec<ProductType>>
where
    R: TypeReader + ?Sized,
{
    Ok(repo.list_types().map_err(|err| {
        log::error!("Failed to list product types: {err}");
        err
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product_type::NewProductType;
    use crate::domain::types::NonEmptyString;
    use crate::repository::TypeWriter;
    use crate::repository::memory::InMemoryRepository;

    #[test]
    fn lists_types_in_creation_order() {
        let repo = InMemoryRepository::new();
        for name in ["Shoes", "Boards", "Caps"] {
            repo.create_type(&NewProductType::new(NonEmptyString::new(name).unwrap()))
                .unwrap();
        }

        let names: Vec<String> = list_types(&repo)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["Shoes", "Boards", "Caps"]);
    }
}
