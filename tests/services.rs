use catalog_query::domain::brand::ProductBrand;
use catalog_query::domain::filter::{FilterSpec, SortKey};
use catalog_query::domain::product::{NewProduct, Product};
use catalog_query::domain::product_type::ProductType;
use catalog_query::domain::types::{BrandId, ProductId};
use catalog_query::repository::memory::InMemoryRepository;
use catalog_query::repository::{
    BrandWriter, DieselRepository, ProductReader, ProductWriter, TypeWriter,
};
use catalog_query::services::{ServiceError, products};

mod common;

trait Catalog: ProductReader + ProductWriter + BrandWriter + TypeWriter {}

impl<R: ProductReader + ProductWriter + BrandWriter + TypeWriter> Catalog for R {}

/// Runs `check` once against SQLite and once against the in-memory store.
fn on_both_backends(name: &str, check: impl Fn(&dyn Catalog)) {
    let test_db = common::TestDb::new(&format!("{name}.db"));
    check(&DieselRepository::new(test_db.pool()));
    check(&InMemoryRepository::new());
}

fn names(items: &[Product]) -> Vec<&str> {
    items.iter().map(|p| p.name.as_str()).collect()
}

fn ids(items: &[Product]) -> Vec<ProductId> {
    items.iter().map(|p| p.id).collect()
}

#[test]
fn test_empty_filter_lists_everything_by_name() {
    on_both_backends("empty_filter", |repo| {
        common::seed_catalog(repo);

        let page = products::list_products(repo, &FilterSpec::new(20)).unwrap();
        assert_eq!(
            names(&page.items),
            [
                "Adidas Cruiser Board",
                "Adidas Runner",
                "Adidas Street Board",
                "Adidas Trail",
                "Nike Park Board",
                "Nike Runner",
                "Nike Trail",
                "Nike runner lite",
            ]
        );
        assert_eq!(page.total_count, 8);
        assert_eq!(page.total_pages(), 1);
    });
}

#[test]
fn test_search_is_a_case_sensitive_substring() {
    on_both_backends("search_substring", |repo| {
        common::seed_catalog(repo);

        let page = products::list_products(repo, &FilterSpec::new(10).search("Runner")).unwrap();
        assert_eq!(names(&page.items), ["Adidas Runner", "Nike Runner"]);
        assert_eq!(page.total_count, 2);

        let page = products::list_products(repo, &FilterSpec::new(10).search("runner")).unwrap();
        assert_eq!(names(&page.items), ["Nike runner lite"]);
        assert_eq!(page.total_count, 1);

        let page = products::list_products(repo, &FilterSpec::new(10).search("")).unwrap();
        assert_eq!(page.total_count, 8);
    });
}

#[test]
fn test_pages_concatenate_to_the_full_listing() {
    on_both_backends("pages_concatenate", |repo| {
        common::seed_catalog(repo);
        let spec = FilterSpec::new(3).sort_by(SortKey::PriceAsc);

        let full = products::list_products(repo, &spec.clone().page(1, 100)).unwrap();
        let mut collected = Vec::new();
        for page_index in 1..=3 {
            let page = products::list_products(repo, &spec.clone().page(page_index, 3)).unwrap();
            assert!(page.items.len() <= 3);
            assert_eq!(page.total_count, 8);
            assert_eq!(page.total_pages(), 3);
            collected.extend(page.items);
        }

        assert_eq!(ids(&collected), ids(&full.items));

        let beyond = products::list_products(repo, &spec.page(4, 3)).unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_count, 8);
    });
}

#[test]
fn test_total_count_follows_the_filter() {
    on_both_backends("total_count_filter", |repo| {
        let (brands, types, _) = common::seed_catalog(repo);

        let unfiltered = FilterSpec::new(2);
        let by_brand = unfiltered.clone().brand(brands[1].id);
        let by_brand_and_type = by_brand.clone().product_type(types[0].id);
        let narrowest = by_brand_and_type.clone().search("Trail");

        let totals: Vec<usize> = [&unfiltered, &by_brand, &by_brand_and_type, &narrowest]
            .into_iter()
            .map(|spec| products::list_products(repo, spec).unwrap().total_count)
            .collect();
        assert_eq!(totals, [8, 4, 3, 1]);

        for page_index in 1..=3 {
            let page =
                products::list_products(repo, &by_brand.clone().page(page_index, 2)).unwrap();
            assert_eq!(page.total_count, 4);
            assert!(page.total_count >= page.items.len());
        }
    });
}

#[test]
fn test_price_desc_reverses_price_asc() {
    on_both_backends("price_desc_reverses", |repo| {
        common::seed_catalog(repo);

        let asc =
            products::list_products(repo, &FilterSpec::new(20).sort_by(SortKey::PriceAsc)).unwrap();
        let desc = products::list_products(repo, &FilterSpec::new(20).sort_by(SortKey::PriceDesc))
            .unwrap();

        let mut reversed = ids(&asc.items);
        reversed.reverse();
        assert_eq!(ids(&desc.items), reversed);
        assert_eq!(asc.items.first().map(|p| p.price), Some(60.0));
        assert_eq!(desc.items.first().map(|p| p.price), Some(150.0));
    });
}

fn two_items(repo: &dyn Catalog) -> (Product, Product) {
    let brand: ProductBrand = common::brand(repo, "Acme");
    let kind: ProductType = common::product_type(repo, "Misc");
    let a = common::product(repo, "A", 10.0, &brand, &kind);
    let b = common::product(repo, "B", 5.0, &brand, &kind);
    (a, b)
}

#[test]
fn test_price_asc_puts_cheaper_item_first() {
    on_both_backends("price_asc_two_items", |repo| {
        let (a, b) = two_items(repo);

        let page = products::list_products(repo, &FilterSpec::new(10).sort_by(SortKey::PriceAsc))
            .unwrap();
        assert_eq!(ids(&page.items), [b.id, a.id]);
        assert_eq!(page.total_count, 2);
    });
}

#[test]
fn test_second_page_of_one_follows_name_order() {
    on_both_backends("second_page_of_one", |repo| {
        let (_, b) = two_items(repo);

        let page = products::list_products(repo, &FilterSpec::new(1).page(2, 1)).unwrap();
        assert_eq!(ids(&page.items), [b.id]);
        assert_eq!(page.total_count, 2);
        assert_eq!(page.total_pages(), 2);
    });
}

#[test]
fn test_get_and_exact_name_lookups() {
    on_both_backends("get_and_lookups", |repo| {
        let (_, _, seeded) = common::seed_catalog(repo);

        let found = products::get_product(repo, seeded[3].id).unwrap();
        assert_eq!(found, seeded[3]);

        let missing = products::get_product(repo, ProductId::new(999).unwrap());
        assert!(matches!(missing, Err(ServiceError::NotFound)));

        let by_name = products::find_products_by_name(repo, "Nike Trail").unwrap();
        assert_eq!(ids(&by_name), [seeded[5].id]);
        assert!(products::find_products_by_name(repo, "Nike").unwrap().is_empty());

        let by_brand = products::find_products_by_brand_name(repo, "Adidas").unwrap();
        assert_eq!(by_brand.len(), 4);
        assert!(by_brand.iter().all(|p| p.brand.name == "Adidas"));
        assert!(
            products::find_products_by_brand_name(repo, "adidas")
                .unwrap()
                .is_empty()
        );
    });
}

#[test]
fn test_write_operations_report_matches() {
    on_both_backends("write_operations", |repo| {
        let (brands, types, _) = common::seed_catalog(repo);

        let created = products::create_product(
            repo,
            &NewProduct::new(
                "  Skate Cap ".to_string(),
                Some(" ".to_string()),
                None,
                None,
                25.0,
                brands[0].id,
                types[1].id,
            ),
        )
        .unwrap();
        assert_eq!(created.name, "Skate Cap");
        assert_eq!(created.summary, None);
        assert_eq!(created.brand, brands[0]);

        assert!(products::update_product(repo, &created).unwrap());

        let mut repriced = created.clone();
        repriced.price = 30.0;
        assert!(products::update_product(repo, &repriced).unwrap());
        assert_eq!(products::get_product(repo, created.id).unwrap().price, 30.0);

        assert!(products::delete_product(repo, created.id).unwrap());
        assert!(!products::delete_product(repo, created.id).unwrap());
        assert!(!products::update_product(repo, &repriced).unwrap());

        let negative = NewProduct::new(
            "Refund".to_string(),
            None,
            None,
            None,
            -1.0,
            brands[0].id,
            types[0].id,
        );
        assert!(matches!(
            products::create_product(repo, &negative),
            Err(ServiceError::InvalidArgument(_))
        ));
    });
}

#[test]
fn test_invalid_page_parameters_are_rejected() {
    on_both_backends("invalid_page_parameters", |repo| {
        common::seed_catalog(repo);

        for spec in [FilterSpec::new(0), FilterSpec::new(10).page(0, 10)] {
            assert!(matches!(
                products::list_products(repo, &spec),
                Err(ServiceError::InvalidArgument(_))
            ));
        }
    });
}

#[test]
fn test_pages_past_the_end_agree_across_backends() {
    on_both_backends("pages_past_the_end", |repo| {
        common::seed_catalog(repo);

        let beyond = products::list_products(repo, &FilterSpec::new(4).page(1000, 4)).unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_count, 8);

        let unrepresentable = products::list_products(repo, &FilterSpec::new(4).page(1 << 62, 4));
        assert!(matches!(
            unrepresentable,
            Err(ServiceError::InvalidArgument(_))
        ));
    });
}

#[test]
fn test_update_of_missing_product_reports_false_before_checking_references() {
    on_both_backends("update_missing_product", |repo| {
        let (_, _, seeded) = common::seed_catalog(repo);

        let mut ghost = seeded[0].clone();
        ghost.id = ProductId::new(999).unwrap();
        ghost.brand.id = BrandId::new(77).unwrap();
        assert!(!products::update_product(repo, &ghost).unwrap());

        let mut dangling = seeded[0].clone();
        dangling.brand.id = BrandId::new(77).unwrap();
        assert!(matches!(
            products::update_product(repo, &dangling),
            Err(ServiceError::BackendOperationFailed(_))
        ));
    });
}

#[test]
fn test_price_ties_page_in_id_order() {
    on_both_backends("price_ties_page_in_id_order", |repo| {
        let brand = common::brand(repo, "Acme");
        let kind = common::product_type(repo, "Misc");
        let cheap = common::product(repo, "Zeta", 5.0, &brand, &kind);
        let tied: Vec<ProductId> = ["Delta", "Alpha", "Charlie", "Bravo"]
            .into_iter()
            .map(|name| common::product(repo, name, 10.0, &brand, &kind).id)
            .collect();
        let dear = common::product(repo, "Echo", 20.0, &brand, &kind);

        let listing = |key: SortKey| -> Vec<ProductId> {
            let spec = FilterSpec::new(2).sort_by(key);
            (1..=3)
                .flat_map(|page_index| {
                    products::list_products(repo, &spec.clone().page(page_index, 2))
                        .unwrap()
                        .items
                })
                .map(|p| p.id)
                .collect()
        };

        let asc = listing(SortKey::PriceAsc);
        let mut expected = vec![cheap.id];
        expected.extend(&tied);
        expected.push(dear.id);
        assert_eq!(asc, expected);
        assert_eq!(listing(SortKey::PriceAsc), asc);

        let desc = listing(SortKey::PriceDesc);
        let mut expected = vec![dear.id];
        expected.extend(&tied);
        expected.push(cheap.id);
        assert_eq!(desc, expected);
        assert_eq!(listing(SortKey::PriceDesc), desc);
    });
}
