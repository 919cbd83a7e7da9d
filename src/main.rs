use analytics::{AnalyticsEngine, JournalReport, Ledger, PnLPoint, StrftimeLabeler};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use configuration::{load_config, validate_prices};
use core_types::TradeRecord;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the journal application.
fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, cli.config.as_deref()),
        Commands::Ledger(args) => handle_ledger(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Realized profit and loss analytics for a trade journal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults to `journal.toml` if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the journal report built from a trades file.
    Report(ReportArgs),
    /// Replay one symbol's trades and show the position after each one.
    Ledger(LedgerArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// JSON file holding an array of trade records.
    #[arg(long)]
    trades: PathBuf,

    /// JSON file mapping symbols to current prices (e.g. {"AAA": 1200}).
    #[arg(long)]
    prices: Option<PathBuf>,

    /// A current price as SYMBOL=PRICE. Overrides the config and prices file.
    #[arg(long = "price", value_parser = parse_price)]
    price_overrides: Vec<(String, Decimal)>,

    /// Only print the given sections.
    #[arg(long, value_enum)]
    section: Vec<Section>,
}

#[derive(Parser)]
struct LedgerArgs {
    /// JSON file holding an array of trade records.
    #[arg(long)]
    trades: PathBuf,

    /// The symbol to replay.
    #[arg(long)]
    symbol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    Overall,
    Insights,
    Symbols,
    Tags,
    Daily,
    Monthly,
}

fn parse_price(value: &str) -> Result<(String, Decimal), String> {
    let (symbol, price) = value
        .split_once('=')
        .ok_or_else(|| format!("expected SYMBOL=PRICE, got {value:?}"))?;
    let price = price
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid price for {symbol}: {e}"))?;
    Ok((symbol.trim().to_string(), price))
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_report(args: ReportArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path).context("Failed to load configuration")?;
    let trades = read_trades(&args.trades)?;

    let mut prices = config.price_map();
    if let Some(path) = &args.prices {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prices file {}", path.display()))?;
        let file_prices: HashMap<String, Decimal> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse prices file {}", path.display()))?;
        prices.extend(file_prices);
    }
    prices.extend(args.price_overrides);
    validate_prices(&prices).context("Invalid current price")?;

    let labeler = StrftimeLabeler::new(
        config.display.weekday_names()?,
        config.display.day_format.clone(),
        config.display.month_format.clone(),
    );

    let report = AnalyticsEngine::new().calculate(&trades, &prices, &labeler);
    print_report(&report, &args.section);
    Ok(())
}

fn handle_ledger(args: LedgerArgs) -> Result<()> {
    let trades: Vec<TradeRecord> = read_trades(&args.trades)?
        .into_iter()
        .filter(|t| t.symbol == args.symbol)
        .collect();
    if trades.is_empty() {
        return Err(anyhow!("No trades found for symbol {}", args.symbol));
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Date", "Id", "Side", "Price", "Qty", "Realized", "Position", "Cost Basis", "Avg Cost",
    ]);
    for entry in Ledger::replay(&trades) {
        table.add_row(vec![
            entry.trade.date.clone(),
            entry.trade.id.clone(),
            entry.trade.side.to_string(),
            money(entry.trade.price),
            entry.trade.quantity.to_string(),
            entry.realized.map(money).unwrap_or_default(),
            entry.position.quantity.to_string(),
            money(entry.position.cost_basis),
            money(entry.position.avg_cost()),
        ]);
    }

    println!("--- Ledger: {} ---", args.symbol);
    println!("{table}");
    Ok(())
}

fn read_trades(path: &Path) -> Result<Vec<TradeRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trades file {}", path.display()))?;
    let trades: Vec<TradeRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse trades file {}", path.display()))?;
    tracing::info!(count = trades.len(), path = %path.display(), "Loaded trades");
    Ok(trades)
}

// ==============================================================================
// Output
// ==============================================================================

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn print_report(report: &JournalReport, sections: &[Section]) {
    let wants = |section: Section| sections.is_empty() || sections.contains(&section);

    if wants(Section::Overall) {
        let o = &report.overall;
        let mut table = Table::new();
        table.set_header(vec!["Metric", "Value"]);
        table.add_row(vec!["Realized PnL".to_string(), money(o.total_realized_pnl)]);
        table.add_row(vec!["Eval PnL".to_string(), money(o.eval_pnl)]);
        table.add_row(vec!["Total PnL".to_string(), money(o.total_pnl)]);
        table.add_row(vec![
            "Open Cost Basis".to_string(),
            money(o.total_open_cost_basis),
        ]);
        table.add_row(vec!["Market Value".to_string(), money(o.total_market_value)]);
        table.add_row(vec![
            "Holding Return %".to_string(),
            money(o.holding_return_rate),
        ]);
        table.add_row(vec!["Sells".to_string(), o.total_trade_count.to_string()]);
        table.add_row(vec!["Win Rate %".to_string(), money(o.win_rate)]);
        table.add_row(vec![
            "Open Positions".to_string(),
            o.open_position_count.to_string(),
        ]);
        println!("--- Overall ---");
        println!("{table}");
    }

    if wants(Section::Insights) {
        let i = &report.insights;
        let mut table = Table::new();
        table.set_header(vec!["Insight", "Value"]);
        table.add_row(vec![
            "Best Day".to_string(),
            format!("{} ({})", i.best_day, money(i.best_day_pnl)),
        ]);
        table.add_row(vec![
            "Best Tag".to_string(),
            format!("{} ({})", i.best_tag, money(i.best_tag_pnl)),
        ]);
        table.add_row(vec!["Long Win Rate %".to_string(), money(i.long_win_rate)]);
        table.add_row(vec!["Short Win Rate %".to_string(), money(i.short_win_rate)]);
        table.add_row(vec!["Max Win".to_string(), money(i.max_win)]);
        table.add_row(vec!["Max Loss".to_string(), money(i.max_loss)]);
        println!("--- Insights ---");
        println!("{table}");
    }

    if wants(Section::Symbols) {
        let mut table = Table::new();
        table.set_header(vec![
            "Symbol", "Name", "Position", "Avg Cost", "Realized", "Sells", "W/L/E", "Win %",
        ]);
        for s in &report.symbols {
            table.add_row(vec![
                s.symbol.clone(),
                s.symbol_name.clone().unwrap_or_default(),
                s.position_quantity.to_string(),
                money(s.avg_cost),
                money(s.realized_pnl),
                s.trade_count.to_string(),
                format!("{}/{}/{}", s.win_count, s.loss_count, s.even_count),
                money(s.win_rate),
            ]);
        }
        println!("--- Symbols ---");
        println!("{table}");
    }

    if wants(Section::Tags) {
        let mut table = Table::new();
        table.set_header(vec!["Tag", "Sells", "W/L/E", "Realized", "Avg/Trade", "Win %"]);
        for t in &report.tags {
            table.add_row(vec![
                t.tag.clone(),
                t.trade_count.to_string(),
                format!("{}/{}/{}", t.win_count, t.loss_count, t.even_count),
                money(t.realized_pnl),
                money(t.avg_pnl_per_trade),
                money(t.win_rate),
            ]);
        }
        println!("--- Tags ---");
        println!("{table}");
    }

    if wants(Section::Daily) {
        println!("--- Daily ---");
        println!("{}", series_table(&report.daily));
    }

    if wants(Section::Monthly) {
        println!("--- Monthly ---");
        println!("{}", series_table(&report.monthly));
    }
}

fn series_table(points: &[PnLPoint]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Key", "Label", "Realized"]);
    for p in points {
        table.add_row(vec![p.key.clone(), p.label.clone(), money(p.value)]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_price_overrides() {
        let (symbol, price) = parse_price("AAA=1200.5").unwrap();
        assert_eq!(symbol, "AAA");
        assert_eq!(price, Decimal::new(12005, 1));
        assert!(parse_price("AAA").is_err());
        assert!(parse_price("AAA=abc").is_err());
    }
}
