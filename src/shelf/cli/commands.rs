use super::print::{
    print_book, print_config, print_events, print_messages, print_slots, print_storekeeper,
    print_total,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use shelf::api::{ConfigAction, RegistryApi};
use shelf::config::ShelfConfig;
use shelf::error::{RegistryError, Result};
use shelf::model::{Address, BookId, Symbol};
use shelf::store::fs::FileStore;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "SHELF_HOME";
const CALLER_ENV: &str = "SHELF_CALLER";
const LOG_ENV: &str = "SHELF_LOG";

struct AppContext {
    api: RegistryApi<FileStore>,
    caller: Option<Address>,
}

impl AppContext {
    fn caller(&self) -> Result<&Address> {
        self.caller.as_ref().ok_or(RegistryError::MissingCaller)
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Deploy { storekeeper }) => handle_deploy(ctx, storekeeper),
        Some(Commands::Add { title, author }) => handle_add(ctx, title, author),
        Some(Commands::Remove { id }) => handle_remove(ctx, id),
        Some(Commands::Retitle { id, title }) => handle_retitle(ctx, id, title),
        Some(Commands::Transfer { storekeeper }) => handle_transfer(ctx, storekeeper),
        Some(Commands::Borrow { id }) => handle_borrow(ctx, id),
        Some(Commands::Return { id }) => handle_return(ctx, id),
        Some(Commands::Show { id }) => handle_show(&ctx, id),
        Some(Commands::Total) => handle_total(&ctx),
        Some(Commands::Loan { identity }) => handle_loan(&ctx, identity),
        Some(Commands::Storekeeper) => handle_storekeeper(&ctx),
        Some(Commands::Events) => handle_events(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::List) | None => handle_list(&ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    let (config, config_error) = match ShelfConfig::load(&data_dir) {
        Ok(config) => (config, None),
        Err(e) => (ShelfConfig::default(), Some(e)),
    };
    init_tracing(cli.verbose, &config);
    if let Some(e) = config_error {
        warn!(error = %e, "ignoring unreadable config.json, using defaults");
    }

    let caller = match &cli.caller {
        Some(caller) => Some(caller.clone()),
        None => match std::env::var(CALLER_ENV) {
            Ok(raw) if !raw.is_empty() => Some(Address::new(raw)?),
            _ => config.caller.clone(),
        },
    };

    let store = FileStore::new(data_dir.clone());
    let api = RegistryApi::new(store, data_dir);
    Ok(AppContext { api, caller })
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "shelf", "shelf")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| RegistryError::Store("Could not determine data directory".to_string()))
}

fn init_tracing(verbose: bool, config: &ShelfConfig) {
    let fallback = if verbose { "debug" } else { config.log_level.as_str() };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_deploy(mut ctx: AppContext, storekeeper: Address) -> Result<()> {
    let result = ctx.api.deploy(storekeeper)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(mut ctx: AppContext, title: Symbol, author: Symbol) -> Result<()> {
    let caller = ctx.caller()?.clone();
    let result = ctx.api.add_book(&caller, title, author)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(mut ctx: AppContext, id: BookId) -> Result<()> {
    let caller = ctx.caller()?.clone();
    let result = ctx.api.remove_book(&caller, id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_retitle(mut ctx: AppContext, id: BookId, title: Symbol) -> Result<()> {
    let caller = ctx.caller()?.clone();
    let result = ctx.api.update_book_title(&caller, id, title)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_transfer(mut ctx: AppContext, storekeeper: Address) -> Result<()> {
    let caller = ctx.caller()?.clone();
    let result = ctx.api.transfer_storekeeper(&caller, storekeeper)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_borrow(mut ctx: AppContext, id: BookId) -> Result<()> {
    let caller = ctx.caller()?.clone();
    let result = ctx.api.borrow_book(&caller, id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_return(mut ctx: AppContext, id: BookId) -> Result<()> {
    let caller = ctx.caller()?.clone();
    let result = ctx.api.return_book(&caller, id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.get_books()?;
    print_slots(&result.listed_slots);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: BookId) -> Result<()> {
    let result = ctx.api.get_book(id)?;
    for book in &result.affected_books {
        print_book(book);
    }
    Ok(())
}

fn handle_total(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.get_total_books()?;
    if let Some(total) = result.total_books {
        print_total(total);
    }
    Ok(())
}

fn handle_loan(ctx: &AppContext, identity: Option<Address>) -> Result<()> {
    let borrower = match identity {
        Some(identity) => identity,
        None => ctx.caller()?.clone(),
    };
    let result = ctx.api.get_loan(&borrower)?;
    for book in &result.affected_books {
        print_book(book);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_storekeeper(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.storekeeper()?;
    if let Some(storekeeper) = &result.storekeeper {
        print_storekeeper(storekeeper, ctx.caller.as_ref());
    }
    Ok(())
}

fn handle_events(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.events()?;
    print_events(&result.events);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    match &result.config {
        Some(config) if result.messages.is_empty() => print_config(config),
        _ => print_messages(&result.messages),
    }
    Ok(())
}
