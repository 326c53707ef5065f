use clap::{Args, Parser, Subcommand};
use swap_quote_scanner_rs::{
    PriceService, PriceServiceConfig, QuoteContext, Settings, SwapClient, SwapError, Transaction,
    ValuedQuote, select_quote,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "swap-quotes",
    version,
    about = "Compare cross-exchange swap quotes and start a trade"
)]
struct Cli {
    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List ranked quotes for a swap
    Quote(SwapArgs),
    /// Pick a quote and create the trade
    Swap {
        #[command(flatten)]
        args: SwapArgs,
        /// 1-based position in the quote list
        #[arg(long)]
        pick: usize,
        /// Address receiving the destination coin
        #[arg(long)]
        address: String,
    },
    /// Look up USD prices
    Price {
        #[arg(required = true)]
        coins: Vec<String>,
    },
    /// Show the current status of a transaction
    Track { id: String },
    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct SwapArgs {
    /// Coin to send (ticker, e.g. BTC)
    #[arg(long)]
    from: String,
    /// Coin to receive (ticker, e.g. XMR)
    #[arg(long)]
    to: String,
    /// Amount of the send coin
    #[arg(long)]
    amount: f64,
    /// Send network; defaults to the send coin
    #[arg(long)]
    network_from: Option<String>,
    /// Receive network; defaults to the receive coin
    #[arg(long)]
    network_to: Option<String>,
    /// Ask the aggregator for its best offer only
    #[arg(long)]
    best: bool,
}

impl SwapArgs {
    fn context(&self) -> QuoteContext {
        QuoteContext::new(
            &self.from,
            &self.to,
            self.amount,
            self.network_from.as_deref(),
            self.network_to.as_deref(),
        )
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {}", e);
        if matches!(e, SwapError::MissingApiKey) {
            eprintln!("Set your API key with: export CYPHERGOAT_API_KEY=\"your_api_key_here\"");
        }
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), SwapError> {
    let settings = Settings::from_env();

    match command {
        Command::Quote(args) => {
            let ctx = args.context();
            let quotes = SwapClient::new(&settings)?
                .fetch_estimates(&ctx, args.best)
                .await?;
            print_quotes(&quotes, &ctx);
        }
        Command::Swap {
            args,
            pick,
            address,
        } => {
            let ctx = args.context();
            let client = SwapClient::new(&settings)?;
            let quotes = client.fetch_estimates(&ctx, args.best).await?;
            if quotes.is_empty() {
                println!("No exchanges available for this trading pair");
                return Ok(());
            }
            print_quotes(&quotes, &ctx);

            let selected = select_quote(&quotes, pick)?;
            let tx = client.create_trade(selected, &address).await?;
            print_transaction(&tx, selected);
        }
        Command::Price { coins } => {
            let prices = PriceService::with_config(
                PriceServiceConfig::default()
                    .with_base_url(settings.price_api_base.clone())
                    .with_timeout(settings.price_timeout),
            )?;
            let coin_refs: Vec<&str> = coins.iter().map(String::as_str).collect();
            let found = prices.get_prices(&coin_refs).await?;
            for coin in &coins {
                match found.get(coin) {
                    Some(price) => println!("{:<8} ${:.2}", coin.to_uppercase(), price),
                    None => println!("{:<8} unavailable", coin.to_uppercase()),
                }
            }
        }
        Command::Track { id } => {
            let tx = SwapClient::new(&settings)?
                .track_transaction(Transaction {
                    id,
                    ..Transaction::default()
                })
                .await?;
            println!("Transaction {}: {}", tx.id, tx.status);
        }
        Command::Version => {
            println!("swap-quotes {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn print_quotes(quotes: &[ValuedQuote], ctx: &QuoteContext) {
    if quotes.is_empty() {
        println!("No exchanges available for this trading pair");
        return;
    }

    let coin_to = ctx.coin_to.to_uppercase();
    println!("{:>3}  {:<20} {:>24} {:>16}", "#", "Exchange", "You Receive", "Value");
    for (i, quote) in quotes.iter().enumerate() {
        println!(
            "{:>3}  {:<20} {:>24} {:>16}",
            i + 1,
            quote.exchange_name,
            format!("{:.8} {}", quote.receive_amount, coin_to),
            format!("${:.2} USD", quote.trade_value_usd)
        );
    }
    println!();
}

fn print_transaction(tx: &Transaction, selected: &ValuedQuote) {
    println!("Transaction initiated successfully\n");
    println!(
        "Amount to Send:      {:.8} {}",
        selected.send_amount,
        selected.coin_from.to_uppercase()
    );
    println!(
        "Estimated Receive:   {:.8} {}",
        tx.estimate_amount,
        selected.coin_to.to_uppercase()
    );
    println!("Transaction ID:      {}", tx.id);
    println!("Deposit Address:     {}", tx.address);
    println!("Exchange Provider:   {}", selected.exchange_name);
    if !tx.cgid.is_empty() {
        println!("Track:               https://cyphergoat.com/transaction/{}", tx.cgid);
    }
    if !tx.track.is_empty() {
        println!("Transaction Status:  {}", tx.track);
    }
    println!(
        "\nImportant: send the exact amount to the deposit address to complete the transaction."
    );
}
