//! Mainnet object IDs and amounts the scripts are pinned to.
//!
//! The protocol's own objects (package, Pond, DuckManager) come from
//! the deployment manifest; everything here belongs to external
//! protocols or predates the manifest.

/// Bucket oracle package.
pub const ORACLE_PACKAGE: &str =
    "0x06dec2d93d91558ef917053673762e44fafac9c999fdeea29b5e6105ad7df246";

/// Shared bucket oracle object.
pub const ORACLE: &str = "0xf6db6a423e8a2b7dea38f57c250a85235f286ffd9b242157eff7a4494dffc119";

/// Switchboard SUI/USD aggregator.
pub const SWITCHBOARD_AGGREGATOR: &str =
    "0x84d2b7e435d6e6a5b137bf6f78f34b2c5515ae61cd8591d5ff6cd121a21aa6b7";

/// Pyth SUI/USD price info object.
pub const PRICE_FEED: &str =
    "0x090d740655461e285affa1654971c4e87064c31f672dda282c61df257c8c1ec0";

/// Staleness tolerance passed to the oracle update, in seconds.
pub const PRICE_TOLERANCE: u64 = 90;

/// Bucket protocol package (defines `buck::BUCK`).
pub const BUCKET_PACKAGE: &str =
    "0x9a36729537fd2f432dedef685b39ff087d53c2f5ab39297f67c336a6da7b1f31";

/// Shared BucketProtocol object.
pub const BUCKET_PROTOCOL: &str =
    "0xc172d7d94db7bbf88662e8cd8b48d2641b98a810b34ff808d84f4e88bd65bdc4";

/// Shared BucketTreasury object.
pub const BUCKET_TREASURY: &str =
    "0x392ae71b0aa00c3c00a43c4e854b605d4b97de586efbcffb6ccbcbd740ec7964";

/// The BUCK coin type.
pub const BUCK_COIN_TYPE: &str =
    "0x9a36729537fd2f432dedef685b39ff087d53c2f5ab39297f67c336a6da7b1f31::buck::BUCK";

/// The operator's BUCK coin object, split from in `send` and `init`.
pub const BUCK_COIN: &str =
    "0x4a3f6a03bc26a2f883452029c81174e63858e74924235008074b6bbd196b8bbf";

/// Recipient of the `send` test transfer.
pub const SEND_RECIPIENT: &str =
    "0xa0cd8ac1269f658a75a13b15c97743e0ba3b67ec6107bcf87dc2ec8466170616";

/// Owned StrategyCap authorizing `pond::pump`.
pub const STRATEGY_CAP: &str =
    "0x8b4ec24712fb1139a6107a4819b7bd7b336664a7273d3895e5149c343648c367";

/// Owned cap authorizing `pond::request_redeem`.
pub const REDEEM_CAP: &str =
    "0x47d8c7473608d8081a59826514701da99dd9d0c9c36d4f316a59caa84aa210c1";

/// SUI split off the gas coin as collateral in `buck`, in MIST.
pub const COLLATERAL_AMOUNT: u64 = 12_000_000_000;

/// BUCK borrowed against the collateral, in base units.
pub const BORROW_AMOUNT: u64 = 10_000_000_000;

/// BUCK moved when seeding the strategy in `init`.
pub const INIT_SEED_AMOUNT: u64 = 1;

/// BUCK moved by the `send` test transfer.
pub const SEND_AMOUNT: u64 = 1000;

/// Gas budget for most scripts, in MIST.
pub const GAS_BUDGET: u64 = 10_000_000;

/// Gas budget for `init`, which creates more state.
pub const INIT_GAS_BUDGET: u64 = 100_000_000;
