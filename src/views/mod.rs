pub mod cash;
pub mod chat;
pub mod for_you;
pub mod key_storage;
pub mod settings;
pub mod shared;
pub mod tax_statement;
pub mod voice_bridge;
pub mod wealth;

pub use cash::CashView;
pub use chat::{ChatButton, ChatPopup};
pub use for_you::ForYouView;
pub use settings::{ApiKeyManager, ProfileMenu};
pub use tax_statement::TaxStatementView;
pub use wealth::WealthView;
