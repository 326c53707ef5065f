pub mod client;
pub mod errors;
pub mod settings;
pub mod utils;

// Re-export
pub use client::{DEFAULT_TIMEOUT, create_http_client};
pub use errors::{PriceError, SwapError};
pub use settings::{Settings, load_dotenv};
pub use utils::{format_amount, normalize_ticker};
