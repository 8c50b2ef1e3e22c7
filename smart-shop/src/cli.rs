//! Command-line front end

use anyhow::{Context, Result, anyhow, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use shop_client::HttpClient;
use smart_shop::render;
use smart_shop::views::{
    FormMode, LOGIN_FAILED_MESSAGE, ListState, Listable, ProductColumn, ProductForm, SaleColumn,
    SaleForm,
};
use smart_shop::{App, Route};

#[derive(Parser)]
#[command(name = "smart-shop", about = "Smart Shop retail management client", version)]
pub struct Cli {
    #[arg(long, global = true, help = "Backend base URL (overrides SMART_SHOP_API_URL)")]
    pub api_url: Option<String>,
    #[arg(long, global = true, help = "Log level filter (overrides LOG_LEVEL)")]
    pub log_level: Option<String>,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON when available"
    )]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and keep the session for later commands
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in user and the navigation
    Whoami,
    /// Last month's sales figures
    Home,
    #[command(subcommand)]
    Products(ProductsCommands),
    #[command(subcommand)]
    Sales(SalesCommands),
    /// Open a screen by path, e.g. `/products/4`
    Open { path: String },
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
}

#[derive(Args, Default)]
pub struct ListArgs {
    #[arg(long, help = "Case-insensitive substring to search for")]
    search: Option<String>,
    #[arg(long, help = "Only show rows of this category")]
    category: Option<String>,
    #[arg(
        long,
        action = ArgAction::Append,
        help = "Sort by column; repeating a column flips the direction"
    )]
    sort: Vec<String>,
}

#[derive(Subcommand)]
pub enum ProductsCommands {
    List(ListArgs),
    Show { id: i64 },
    Add(ProductFieldArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ProductFieldArgs,
    },
    Delete { id: i64 },
}

#[derive(Args)]
pub struct ProductFieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    mrp: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, help = "Category id")]
    category: Option<String>,
    #[arg(long, help = "Units in stock")]
    inventory: Option<String>,
}

impl ProductFieldArgs {
    fn apply<H: HttpClient>(&self, form: &mut ProductForm<H>) -> Result<()> {
        let fields = [
            ("name", &self.name),
            ("price", &self.price),
            ("mrp", &self.mrp),
            ("description", &self.description),
            ("category", &self.category),
            ("inventory", &self.inventory),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                form.set_field(field, value.clone())?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum SalesCommands {
    List(ListArgs),
    Show {
        id: i64,
    },
    Add {
        #[arg(
            long = "item",
            value_parser = parse_pair::<i64>,
            action = ArgAction::Append,
            help = "Sale line as PRODUCT_ID:QUANTITY"
        )]
        items: Vec<(i64, i64)>,
    },
    /// Change line quantities of an existing sale
    Update {
        id: i64,
        #[arg(
            long = "quantity",
            value_parser = parse_pair::<usize>,
            action = ArgAction::Append,
            help = "New quantity as LINE:QUANTITY (lines count from 1)"
        )]
        quantities: Vec<(usize, i64)>,
    },
    Delete {
        id: i64,
    },
}

fn parse_pair<T: std::str::FromStr>(value: &str) -> Result<(T, i64), String> {
    let (key, quantity) = value
        .split_once(':')
        .ok_or_else(|| format!("expected KEY:QUANTITY, got '{}'", value))?;
    let key = key
        .trim()
        .parse()
        .map_err(|_| format!("invalid number '{}'", key))?;
    let quantity = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity '{}'", quantity))?;
    Ok((key, quantity))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn apply_list_args<T, F>(state: &mut ListState<T>, args: &ListArgs, parse: F) -> Result<()>
where
    T: Listable,
    F: Fn(&str) -> Result<T::Column, String>,
{
    if let Some(search) = &args.search {
        state.set_search(search.as_str());
    }
    if let Some(category) = &args.category {
        state.set_category(category.as_str());
    }
    for column in &args.sort {
        state.toggle_sort(parse(column).map_err(|e| anyhow!(e))?);
    }
    Ok(())
}

pub async fn run<H: HttpClient + Clone>(app: &App<H>, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::Login(args) => login(app, args).await,
        Commands::Logout => {
            let route = app.header().logout().await?;
            println!("Logged out. Next: {}", route);
            Ok(())
        }
        Commands::Whoami => whoami(app).await,
        Commands::Home => home(app, json).await,
        Commands::Products(command) => products(app, command, json).await,
        Commands::Sales(command) => sales(app, command, json).await,
        Commands::Open { path } => open(app, &path, json).await,
    }
}

async fn login<H: HttpClient + Clone>(app: &App<H>, args: LoginArgs) -> Result<()> {
    let mut form = app.login_form().with_credentials(args.username, args.password);
    match form.submit().await {
        Ok(route) => {
            println!("Logged in. Next: {}", route);
            Ok(())
        }
        Err(e) if e.is_cancelled() => Err(e.into()),
        Err(_) => bail!("{}", form.error().unwrap_or(LOGIN_FAILED_MESSAGE)),
    }
}

async fn whoami<H: HttpClient + Clone>(app: &App<H>) -> Result<()> {
    let mut header = app.header();
    header.refresh().await;
    println!("{}", render::nav(header.display_name(), header.nav_links().await));
    Ok(())
}

async fn home<H: HttpClient + Clone>(app: &App<H>, json: bool) -> Result<()> {
    let mut view = app.home();
    let loaded = view.load().await;
    if json {
        print_json(view.metrics())?;
    } else {
        print!("{}", render::home(view.metrics()));
    }
    loaded.context("failed to load dashboard data")
}

async fn products<H: HttpClient + Clone>(
    app: &App<H>,
    command: ProductsCommands,
    json: bool,
) -> Result<()> {
    match command {
        ProductsCommands::List(args) => list_products(app, &args, json).await,
        ProductsCommands::Show { id } => show_product(app, FormMode::Edit(id)).await,
        ProductsCommands::Add(fields) => save_product(app, FormMode::Create, &fields).await,
        ProductsCommands::Edit { id, fields } => save_product(app, FormMode::Edit(id), &fields).await,
        ProductsCommands::Delete { id } => {
            let mut view = app.products();
            view.load().await?;
            view.delete(id).await?;
            println!("Product {} deleted.", id);
            print!("{}", render::products_table(&view.visible(), view.state().sort()));
            Ok(())
        }
    }
}

async fn list_products<H: HttpClient + Clone>(app: &App<H>, args: &ListArgs, json: bool) -> Result<()> {
    let mut view = app.products();
    view.load().await.context("failed to load products")?;
    apply_list_args(view.state_mut(), args, |s| s.parse::<ProductColumn>())?;
    if json {
        print_json(&view.visible())
    } else {
        print!("{}", render::products_table(&view.visible(), view.state().sort()));
        Ok(())
    }
}

async fn show_product<H: HttpClient + Clone>(app: &App<H>, mode: FormMode) -> Result<()> {
    let mut form = app.product_form(mode);
    form.load().await.context("failed to load product")?;
    let category = form.selected_category().map(|c| c.name.as_str());
    print!("{}", render::product_form(form.title(), form.mode(), form.draft(), category));
    Ok(())
}

async fn save_product<H: HttpClient + Clone>(
    app: &App<H>,
    mode: FormMode,
    fields: &ProductFieldArgs,
) -> Result<()> {
    let mut form = app.product_form(mode);
    form.load().await.context("failed to load product")?;
    fields.apply(&mut form)?;
    let route = form.submit().await?;
    println!("Product saved. Next: {}", route);
    Ok(())
}

async fn sales<H: HttpClient + Clone>(app: &App<H>, command: SalesCommands, json: bool) -> Result<()> {
    match command {
        SalesCommands::List(args) => list_sales(app, &args, json).await,
        SalesCommands::Show { id } => {
            let mut form = app.sale_form(FormMode::Edit(id));
            form.load().await.context("failed to load sale")?;
            print_sale_form(&form);
            Ok(())
        }
        SalesCommands::Add { items } => {
            let mut form = app.sale_form(FormMode::Create);
            form.load().await?;
            for (product, quantity) in items {
                let index = form.add_item()?;
                form.select_product(index, product)?;
                form.set_quantity(index, quantity)?;
            }
            print_sale_form(&form);
            let route = form.submit().await?;
            println!("Sale saved. Next: {}", route);
            Ok(())
        }
        SalesCommands::Update { id, quantities } => {
            let mut form = app.sale_form(FormMode::Edit(id));
            form.load().await.context("failed to load sale")?;
            for (line, quantity) in quantities {
                if line == 0 {
                    bail!("lines count from 1");
                }
                form.set_quantity(line - 1, quantity)?;
            }
            print_sale_form(&form);
            let route = form.submit().await?;
            println!("Sale updated. Next: {}", route);
            Ok(())
        }
        SalesCommands::Delete { id } => {
            let mut view = app.sales();
            view.load().await?;
            view.delete(id).await?;
            println!("Sale {} deleted.", id);
            print!("{}", render::sales_table(&view.visible(), view.state().sort()));
            Ok(())
        }
    }
}

async fn list_sales<H: HttpClient + Clone>(app: &App<H>, args: &ListArgs, json: bool) -> Result<()> {
    let mut view = app.sales();
    view.load().await.context("failed to load sales")?;
    apply_list_args(view.state_mut(), args, |s| s.parse::<SaleColumn>())?;
    if json {
        print_json(&view.visible())
    } else {
        print!("{}", render::sales_table(&view.visible(), view.state().sort()));
        Ok(())
    }
}

fn print_sale_form<H: HttpClient>(form: &SaleForm<H>) {
    let date = form.sale_date().format("%Y-%m-%d").to_string();
    let receipt = form.sale().and_then(|s| s.receipt_number.as_deref());
    print!(
        "{}",
        render::sale_form(form.title(), receipt, &date, form.lines(), form.grand_total())
    );
}

async fn open<H: HttpClient + Clone>(app: &App<H>, path: &str, json: bool) -> Result<()> {
    let route = Route::parse(path);
    tracing::debug!(%route, "Opening");
    match route {
        Route::Login => {
            println!("Log in with `smart-shop login --username <name> --password <password>`.");
            Ok(())
        }
        Route::Home => home(app, json).await,
        Route::Products => list_products(app, &ListArgs::default(), json).await,
        Route::ProductNew => show_product(app, FormMode::Create).await,
        Route::ProductEdit(id) => show_product(app, FormMode::Edit(id)).await,
        Route::Sales => list_sales(app, &ListArgs::default(), json).await,
        Route::SaleNew => {
            let mut form = app.sale_form(FormMode::Create);
            form.load().await?;
            print_sale_form(&form);
            Ok(())
        }
        Route::SaleView(id) => sales(app, SalesCommands::Show { id }, json).await,
        Route::NotFound => {
            println!("{}", render::NOT_FOUND_MESSAGE);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair::<i64>("4:2"), Ok((4, 2)));
        assert_eq!(parse_pair::<usize>(" 1 : 3 "), Ok((1, 3)));
        assert!(parse_pair::<i64>("4").is_err());
        assert!(parse_pair::<i64>("a:2").is_err());
    }

    #[test]
    fn test_cli_parses_repeated_sort() {
        let cli = Cli::try_parse_from([
            "smart-shop", "products", "list", "--sort", "name", "--sort", "name", "--search", "rice",
        ])
        .unwrap();
        match cli.command {
            Commands::Products(ProductsCommands::List(args)) => {
                assert_eq!(args.sort, vec!["name", "name"]);
                assert_eq!(args.search.as_deref(), Some("rice"));
            }
            _ => panic!("expected products list"),
        }
    }

    #[test]
    fn test_cli_parses_sale_items() {
        let cli = Cli::try_parse_from(["smart-shop", "sales", "add", "--item", "3:2", "--item", "5:1"])
            .unwrap();
        match cli.command {
            Commands::Sales(SalesCommands::Add { items }) => assert_eq!(items, vec![(3, 2), (5, 1)]),
            _ => panic!("expected sales add"),
        }
    }
}
