use std::path::Path;
use std::sync::Arc;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde_json::{json, Value};

use listgrid::adapters::{JsonFileStore, MemoryCollection};
use listgrid::config::ListConfig;
use listgrid::controller::ListController;
use listgrid::logging;
use listgrid::models::{ColumnDef, ColumnType};
use listgrid::persistence::{StatePersistence, ViewPersistence};
use listgrid::traits::{KeyValueStore, ListScreen};
use listgrid::view::ListView;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "\
Usage: listgrid [OPTIONS] [ROWS.json]

Loads ROWS.json (an array of objects) or a built-in vehicle sample, mounts a
list over it and prints the pages produced by a short scripted session.

Options:
  --search TEXT     Quick filter to type (default: seat)
  --sort FIELD      Column to sort by (default: year)
  --no-persist      Do not read or write ~/.listgrid/state.json
  -V, --version     Print version
  -h, --help        Print this help";

struct Args {
    rows_path: Option<String>,
    search: String,
    sort: String,
    persist: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args {
        rows_path: None,
        search: "seat".to_string(),
        sort: "year".to_string(),
        persist: true,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(None);
            }
            "-V" | "--version" => {
                println!("listgrid {}", VERSION);
                return Ok(None);
            }
            "--search" => {
                args.search = iter.next().ok_or_else(|| eyre!("--search needs a value"))?;
            }
            "--sort" => {
                args.sort = iter.next().ok_or_else(|| eyre!("--sort needs a value"))?;
            }
            "--no-persist" => args.persist = false,
            other if other.starts_with('-') => return Err(eyre!("unknown option {other}")),
            other => args.rows_path = Some(other.to_string()),
        }
    }
    Ok(Some(args))
}

struct RowsScreen {
    title: String,
    columns: Vec<ColumnDef<Value>>,
}

impl RowsScreen {
    /// Columns inferred from the first row.
    fn infer(title: &str, rows: &[Value]) -> Self {
        let columns = match rows.first() {
            Some(Value::Object(first)) => first
                .iter()
                .filter(|(field, _)| field.as_str() != "_id")
                .map(|(field, value)| {
                    let column_type = match value {
                        Value::Number(_) => ColumnType::Number,
                        Value::Bool(_) => ColumnType::Boolean,
                        _ => ColumnType::String,
                    };
                    ColumnDef::new(field.clone(), field.clone()).with_type(column_type)
                })
                .collect(),
            _ => Vec::new(),
        };
        Self {
            title: title.to_string(),
            columns,
        }
    }
}

impl ListScreen<Value> for RowsScreen {
    fn column_definitions(&self) -> Vec<ColumnDef<Value>> {
        self.columns.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}

fn sample_vehicles() -> Vec<Value> {
    let models = [
        ("Seat", "Ibiza", 2019),
        ("Seat", "Leon", 2021),
        ("Renault", "Clio", 2018),
        ("Peugeot", "208", 2022),
        ("Seat", "Arona", 2020),
        ("Volkswagen", "Golf", 2017),
        ("Toyota", "Corolla", 2023),
        ("Seat", "Ateca", 2016),
        ("Ford", "Focus", 2019),
        ("Kia", "Ceed", 2021),
        ("Seat", "Tarraco", 2022),
        ("Dacia", "Sandero", 2020),
    ];
    models
        .iter()
        .enumerate()
        .map(|(i, (brand, model, year))| {
            json!({
                "_id": format!("v{}", i + 1),
                "plate": format!("{:04}-KLM", 1000 + i * 137),
                "brand": brand,
                "model": model,
                "year": year,
                "active": i % 3 != 0,
            })
        })
        .collect()
}

fn load_rows(path: &Path) -> Result<Vec<Value>> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).wrap_err_with(|| format!("parsing {}", path.display()))
}

/// Persistence under the default state file, or none if it cannot be located.
fn open_persistence(key: &str) -> ViewPersistence {
    match JsonFileStore::default_location() {
        Ok(store) => {
            let store: Arc<dyn KeyValueStore> = Arc::new(store);
            Arc::new(StatePersistence::new(store)).bind(Some(key.to_string()))
        }
        Err(e) => {
            tracing::warn!(
                error_code = e.error_code(),
                "Quick filter will not be persisted: {}",
                e
            );
            ViewPersistence::disabled()
        }
    }
}

fn print_page(label: &str, view: &ListView<Value>) -> Result<()> {
    let grid = view.grid();
    let out = json!({
        "step": label,
        "search": view.presenter().quick_filter(),
        "sort": view.presenter().state().sort_field,
        "direction": view.presenter().state().sort_direction,
        "page": grid.current_page + 1,
        "totalPages": grid.total_pages,
        "totalItems": grid.total_items,
        "rows": grid.rows,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let (title, rows) = match &args.rows_path {
        Some(path) => ("Rows", load_rows(Path::new(path))?),
        None => ("Vehicles", sample_vehicles()),
    };
    tracing::info!(rows = rows.len(), "Loaded collection");

    let screen = Arc::new(RowsScreen::infer(title, &rows));
    let collection = Arc::new(MemoryCollection::new(rows));

    let persistence = if args.persist {
        open_persistence(&title.to_lowercase())
    } else {
        ViewPersistence::disabled()
    };

    let builder = ListController::<Value, Value, Value>::builder(screen, collection.clone())
        .crud(collection)
        .persistence(persistence)
        .config(ListConfig::from_env());
    let mut view: ListView<Value> = ListView::mount(builder)?;

    view.settle().await;
    print_page("initial", &view)?;

    let mut typed = String::new();
    for ch in args.search.chars() {
        typed.push(ch);
        view.type_quick_filter(&typed).await?;
    }
    view.settle().await;
    print_page("search", &view)?;

    view.click_sort(&args.sort).await?;
    view.settle().await;
    print_page("sort", &view)?;

    view.clear_quick_filter().await?;
    view.settle().await;
    view.change_page(1).await?;
    view.settle().await;
    print_page("page 2", &view)?;

    view.teardown();
    Ok(())
}
