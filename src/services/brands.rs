use crate::domain::brand::ProductBrand;
use crate::repository::BrandReader;
use crate::services::ServiceResult;

/// Every brand known to the catalog, in creation order.
pub fn list_brands<R>(repo: &R) -> ServiceResult<Vec<ProductBrand>>
where
    R: BrandReader + ?Sized,
{
    Ok(repo.list_brands().map_err(|err| {
        log::error!("Failed to list brands: {err}");
        err
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::BrandId;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    #[test]
    fn lists_brands_from_the_repository() {
        let mut repo = MockRepository::new();
        repo.expect_list_brands().returning(|| {
            Ok(vec![ProductBrand {
                id: BrandId::new(1).unwrap(),
                name: "Adidas".to_string(),
            }])
        });

        let brands = list_brands(&repo).unwrap();
        assert_eq!(brands.len(), 1);
        assert_eq!(brands[0].name, "Adidas");
    }

    #[test]
    fn unreachable_store_is_reported() {
        let mut repo = MockRepository::new();
        repo.expect_list_brands()
            .returning(|| Err(RepositoryError::ConnectionError("down".into())));

        assert!(matches!(
            list_brands(&repo),
            Err(ServiceError::BackendUnavailable(_))
        ));
    }
}
