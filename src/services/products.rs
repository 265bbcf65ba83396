use validator::Validate;

use crate::domain::filter::{FilterExpr, FilterSpec, ProductField};
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::ProductId;
use crate::pagination::{Page, PageWindow};
use crate::repository::{ProductQuery, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

fn check_price(price: f64) -> ServiceResult<()> {
    if price.is_finite() {
        Ok(())
    } else {
        Err(ServiceError::InvalidArgument(format!(
            "price must be a finite number, got {price}"
        )))
    }
}

/// Returns one page of products matching `spec` and the filtered total.
///
/// The page query and the count run against the same composite filter, so
/// `total_count` is stable across pages and never smaller than the page.
pub fn list_products<R>(repo: &R, spec: &FilterSpec) -> ServiceResult<Page<Product>>
where
    R: ProductReader + ?Sized,
{
    spec.validate()?;
    let window = PageWindow::new(spec.page_index, spec.page_size)?;

    let query = ProductQuery::new(spec.to_filter())
        .sort(spec.sort())
        .paginate(window);
    log::debug!("Listing products with {query:?}");

    let items = repo.find_products(&query).map_err(|err| {
        log::error!("Failed to list products: {err}");
        err
    })?;
    let total_count = repo.count_products(&query.filter).map_err(|err| {
        log::error!("Failed to count products: {err}");
        err
    })?;

    Ok(Page::new(items, window, total_count))
}

pub fn get_product<R>(repo: &R, id: ProductId) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let query = ProductQuery::new(FilterExpr::eq_id(ProductField::Id, id.get()))
        .paginate(PageWindow::new(1, 1)?);

    repo.find_products(&query)
        .map_err(|err| {
            log::error!("Failed to load product {id}: {err}");
            err
        })?
        .into_iter()
        .next()
        .ok_or(ServiceError::NotFound)
}

/// Products whose name equals `name` exactly.
pub fn find_products_by_name<R>(repo: &R, name: &str) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let query = ProductQuery::new(FilterExpr::eq_text(ProductField::Name, name));

    Ok(repo.find_products(&query).map_err(|err| {
        log::error!("Failed to find products named {name:?}: {err}");
        err
    })?)
}

/// Products whose brand name equals `name` exactly.
pub fn find_products_by_brand_name<R>(repo: &R, name: &str) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let query = ProductQuery::new(FilterExpr::eq_text(ProductField::BrandName, name));

    Ok(repo.find_products(&query).map_err(|err| {
        log::error!("Failed to find products of brand {name:?}: {err}");
        err
    })?)
}

pub fn create_product<R>(repo: &R, new_product: &NewProduct) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    new_product.validate()?;
    check_price(new_product.price)?;

    let product = repo.insert_product(new_product).map_err(|err| {
        log::error!("Failed to create product: {err}");
        err
    })?;
    log::info!("Created product {} ({})", product.id, product.name);

    Ok(product)
}

/// Replaces the stored product with the same id.
///
/// Returns `false` when no product has that id.
pub fn update_product<R>(repo: &R, product: &Product) -> ServiceResult<bool>
where
    R: ProductWriter + ?Sized,
{
    product.validate()?;
    check_price(product.price)?;

    let ack = repo.replace_product(product).map_err(|err| {
        log::error!("Failed to update product {}: {err}", product.id);
        err
    })?;

    Ok(ack.is_single())
}

/// Returns `false` when no product has that id.
pub fn delete_product<R>(repo: &R, id: ProductId) -> ServiceResult<bool>
where
    R: ProductWriter + ?Sized,
{
    let ack = repo.delete_product(id).map_err(|err| {
        log::error!("Failed to delete product {id}: {err}");
        err
    })?;

    Ok(ack.is_single())
}
