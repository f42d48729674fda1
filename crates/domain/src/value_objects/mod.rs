pub mod deposit;
pub mod fee_tier;
pub mod liquidity;
pub mod position;
pub mod token;

pub use deposit::Deposit;
pub use fee_tier::FeeTier;
pub use liquidity::Liquidity;
pub use position::LiquidityPosition;
pub use token::{PairPrices, TokenInfo};
