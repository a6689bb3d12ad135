pub mod raffle_ctx;
pub mod raffle_flow;

pub use raffle_ctx::RaffleCtx;
pub use raffle_flow::RaffleFlow;
