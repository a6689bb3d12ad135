pub mod ledger;
pub mod raffle;
pub mod responses;

pub use ledger::{JoinedSet, PendingQueue, RaffleLedger};
pub use raffle::{Classification, RaffleId, RaffleOutcome};
pub use responses::{EnterRaffleResponse, LatestRelease, PaginateResponse};
