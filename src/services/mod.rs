pub mod cookie_store;
pub mod entry_classifier;
pub mod entry_submitter;
pub mod raffle_scanner;
pub mod update_checker;
pub mod won_checker;

pub use cookie_store::CookieStore;
pub use entry_classifier::EntryClassifier;
pub use entry_submitter::EntrySubmitter;
pub use raffle_scanner::{RaffleScanner, ScanSettings};
pub use update_checker::UpdateChecker;
