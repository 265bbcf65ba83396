//! Diesel implementation of the product capabilities.
//!
//! [`FilterExpr`] values are compiled into `WHERE` clauses over the
//! `products ⋈ brands ⋈ product_types` join; conjunctions become chained
//! filters on one boxed statement.

use diesel::dsl::{InnerJoin, IntoBoxed};
use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::filter::{Direction, FilterExpr, FilterValue, ProductField, Sort, SortField};
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::ProductId;
use crate::models::brand::Brand as DbBrand;
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, ProductRow, ReplaceProduct,
};
use crate::models::product_type::ProductType as DbProductType;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductQuery, ProductReader, ProductWriter, WriteAck};
use crate::schema::{brands, product_types, products};

diesel::define_sql_function! {
    /// SQLite `instr`: 1-based position of `needle` in `haystack`, 0 when absent.
    fn instr(haystack: Text, needle: Text) -> Integer;
}

type ProductJoin = InnerJoin<InnerJoin<products::table, brands::table>, product_types::table>;
type BoxedProductQuery<'a> = IntoBoxed<'a, ProductJoin, Sqlite>;

fn joined<'a>() -> BoxedProductQuery<'a> {
    products::table
        .inner_join(brands::table)
        .inner_join(product_types::table)
        .into_boxed()
}

fn apply_filter<'a>(
    query: BoxedProductQuery<'a>,
    expr: &FilterExpr,
) -> RepositoryResult<BoxedProductQuery<'a>> {
    match expr {
        FilterExpr::And(parts) => parts
            .iter()
            .try_fold(query, |query, part| apply_filter(query, part)),
        FilterExpr::Eq(field, value) => match (field, value) {
            (ProductField::Id, FilterValue::Id(id)) => Ok(query.filter(products::id.eq(*id))),
            (ProductField::BrandId, FilterValue::Id(id)) => {
                Ok(query.filter(products::brand_id.eq(*id)))
            }
            (ProductField::TypeId, FilterValue::Id(id)) => {
                Ok(query.filter(products::type_id.eq(*id)))
            }
            (ProductField::Name, FilterValue::Text(text)) => {
                Ok(query.filter(products::name.eq(text.clone())))
            }
            (ProductField::BrandName, FilterValue::Text(text)) => {
                Ok(query.filter(brands::name.eq(text.clone())))
            }
            (field, value) => Err(RepositoryError::ValidationError(format!(
                "cannot compare {field:?} with {value:?}"
            ))),
        },
        FilterExpr::Contains(field, needle) => match field {
            ProductField::Name => Ok(query.filter(instr(products::name, needle.clone()).gt(0))),
            ProductField::BrandName => {
                Ok(query.filter(instr(brands::name, needle.clone()).gt(0)))
            }
            other => Err(RepositoryError::ValidationError(format!(
                "{other:?} is not a text field"
            ))),
        },
    }
}

fn apply_sort<'a>(query: BoxedProductQuery<'a>, sort: Sort) -> BoxedProductQuery<'a> {
    let query = match (sort.field, sort.direction) {
        (SortField::Name, Direction::Asc) => query.order_by(products::name.asc()),
        (SortField::Name, Direction::Desc) => query.order_by(products::name.desc()),
        (SortField::Price, Direction::Asc) => query.order_by(products::price.asc()),
        (SortField::Price, Direction::Desc) => query.order_by(products::price.desc()),
    };
    query.then_order_by(products::id.asc())
}

fn to_sql_count(value: usize) -> RepositoryResult<i64> {
    i64::try_from(value).map_err(|_| {
        RepositoryError::Unexpected(format!("{value} exceeds the supported row range"))
    })
}

fn into_products(rows: Vec<ProductRow>) -> RepositoryResult<Vec<Product>> {
    rows.into_iter()
        .map(|row| Product::try_from(row).map_err(RepositoryError::from))
        .collect()
}

fn load_product(conn: &mut SqliteConnection, id: i32) -> RepositoryResult<Product> {
    let row = joined()
        .filter(products::id.eq(id))
        .select((
            DbProduct::as_select(),
            DbBrand::as_select(),
            DbProductType::as_select(),
        ))
        .first::<ProductRow>(conn)?;

    Ok(Product::try_from(row)?)
}

impl ProductReader for DieselRepository {
    fn find_products(&self, query: &ProductQuery) -> RepositoryResult<Vec<Product>> {
        let mut conn = self.conn()?;

        let mut statement = apply_sort(apply_filter(joined(), &query.filter)?, query.sort);
        if let Some(window) = query.window {
            statement = statement
                .limit(to_sql_count(window.limit())?)
                .offset(to_sql_count(window.skip())?);
        }

        let rows = statement
            .select((
                DbProduct::as_select(),
                DbBrand::as_select(),
                DbProductType::as_select(),
            ))
            .load::<ProductRow>(&mut conn)?;

        into_products(rows)
    }

    fn count_products(&self, filter: &FilterExpr) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let total: i64 = apply_filter(joined(), filter)?
            .count()
            .get_result(&mut conn)?;

        usize::try_from(total)
            .map_err(|_| RepositoryError::Unexpected(format!("negative row count {total}")))
    }
}

impl ProductWriter for DieselRepository {
    fn insert_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;
        let insertable: DbNewProduct = new_product.into();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let id: i32 = diesel::insert_into(products::table)
                .values(&insertable)
                .returning(products::id)
                .get_result(conn)?;
            load_product(conn, id)
        })
    }

    fn replace_product(&self, product: &Product) -> RepositoryResult<WriteAck> {
        let mut conn = self.conn()?;
        let changes: ReplaceProduct = product.into();

        let affected = diesel::update(products::table.find(product.id.get()))
            .set(&changes)
            .execute(&mut conn)?;

        Ok(WriteAck::acknowledged(affected))
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<WriteAck> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(products::table.find(id.get())).execute(&mut conn)?;

        Ok(WriteAck::acknowledged(affected))
    }
}
