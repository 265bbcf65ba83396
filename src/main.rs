use std::env;

use catalog_query::db::open_catalog;
use catalog_query::domain::brand::{NewBrand, ProductBrand};
use catalog_query::domain::filter::{FilterSpec, SortKey};
use catalog_query::domain::product::{NewProduct, Product};
use catalog_query::domain::product_type::{NewProductType, ProductType};
use catalog_query::domain::types::{BrandId, NonEmptyString, ProductId, TypeId};
use catalog_query::models::config::CatalogConfig;
use catalog_query::pagination::Page;
use catalog_query::repository::{BrandWriter, DieselRepository, TypeWriter};
use catalog_query::services::{ServiceError, ServiceResult, brands, products, types};
use clap::{Parser, Subcommand};
use config::Config;
use dotenvy::dotenv;
use serde::Serialize;

#[derive(Parser)]
#[command(version, about = "Query and maintain the product catalog", long_about = None)]
#[command(name = "catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one page of products matching the given filters.
    List {
        /// Case-sensitive substring of the product name.
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        brand: Option<i32>,
        #[arg(long = "type")]
        type_id: Option<i32>,
        /// One of nameAsc, priceAsc, priceDesc.
        #[arg(long)]
        sort: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        size: Option<usize>,
    },
    /// Show a single product.
    Get { id: i32 },
    /// Products with exactly this name.
    ByName { name: String },
    /// Products of the brand with exactly this name.
    ByBrand { name: String },
    /// Create a product from a JSON document.
    Create { json: String },
    /// Replace a product from a JSON document carrying its id.
    Update { json: String },
    Delete { id: i32 },
    Brands,
    Types,
    AddBrand { name: String },
    AddType { name: String },
}

#[derive(Serialize)]
#[serde(untagged)]
enum Output {
    Page(Page<Product>),
    Product(Product),
    Products(Vec<Product>),
    Brand(ProductBrand),
    Brands(Vec<ProductBrand>),
    Type(ProductType),
    Types(Vec<ProductType>),
    Acknowledged { matched: bool },
}

fn parse_json<T: serde::de::DeserializeOwned>(json: &str) -> ServiceResult<T> {
    serde_json::from_str(json).map_err(|e| ServiceError::InvalidArgument(e.to_string()))
}

fn execute(
    command: Command,
    repo: &DieselRepository,
    config: &CatalogConfig,
) -> ServiceResult<Output> {
    let output = match command {
        Command::List {
            search,
            brand,
            type_id,
            sort,
            page,
            size,
        } => {
            let page_size = size.unwrap_or(config.default_page_size);
            let mut spec = FilterSpec::new(page_size).page(page, page_size);
            if let Some(text) = search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
            {
                spec = spec.search(text);
            }
            if let Some(id) = brand {
                spec = spec.brand(BrandId::new(id)?);
            }
            if let Some(id) = type_id {
                spec = spec.product_type(TypeId::new(id)?);
            }
            if let Some(key) = sort {
                spec = spec.sort_by(SortKey::from(key));
            }
            Output::Page(products::list_products(repo, &spec)?)
        }
        Command::Get { id } => Output::Product(products::get_product(repo, ProductId::new(id)?)?),
        Command::ByName { name } => {
            Output::Products(products::find_products_by_name(repo, &name)?)
        }
        Command::ByBrand { name } => {
            Output::Products(products::find_products_by_brand_name(repo, &name)?)
        }
        Command::Create { json } => {
            let raw: NewProduct = parse_json(&json)?;
            let new_product = NewProduct::new(
                raw.name,
                raw.summary,
                raw.description,
                raw.image_file,
                raw.price,
                raw.brand_id,
                raw.type_id,
            );
            Output::Product(products::create_product(repo, &new_product)?)
        }
        Command::Update { json } => {
            let product: Product = parse_json(&json)?;
            Output::Acknowledged {
                matched: products::update_product(repo, &product)?,
            }
        }
        Command::Delete { id } => Output::Acknowledged {
            matched: products::delete_product(repo, ProductId::new(id)?)?,
        },
        Command::Brands => Output::Brands(brands::list_brands(repo)?),
        Command::Types => Output::Types(types::list_types(repo)?),
        Command::AddBrand { name } => {
            let brand = repo.create_brand(&NewBrand::new(NonEmptyString::new(name)?))?;
            Output::Brand(brand)
        }
        Command::AddType { name } => {
            let new_type = NewProductType::new(NonEmptyString::new(name)?);
            Output::Type(repo.create_type(&new_type)?)
        }
    };

    Ok(output)
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let catalog_config = match settings.try_deserialize::<CatalogConfig>() {
        Ok(catalog_config) => catalog_config,
        Err(err) => {
            log::error!("Error loading catalog config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match open_catalog(&catalog_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to open catalog database: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);

    let output = match execute(cli.command, &repo, &catalog_config) {
        Ok(output) => output,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Failed to render output: {err}");
            std::process::exit(1);
        }
    }
}
