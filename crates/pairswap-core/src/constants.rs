//! # Protocol Constants
//!
//! Fundamental constants for the constant-product exchange including:
//! - Fixed-point and reserve bounds
//! - Liquidity lock and fee defaults
//! - Domain tags for derived identities and permit digests

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Bit width reserves are stored in
pub const RESERVE_BITS: u32 = 112;

/// Largest reserve a pool can record: 2^112 - 1
pub const MAX_RESERVE: u128 = (1u128 << RESERVE_BITS) - 1;

/// UQ112x112 scale factor: 2^112
pub const Q112: u128 = 1u128 << RESERVE_BITS;

/// Period pool timestamps wrap at: 2^32 seconds
pub const TIMESTAMP_PERIOD: u64 = 1u64 << 32;

// ============================================================================
// Liquidity Constants
// ============================================================================

/// Shares permanently locked to the zero address on a pool's first deposit
pub const MINIMUM_LIQUIDITY: u128 = 1_000;

/// Decimals used by pool share tokens
pub const SHARE_DECIMALS: u8 = 18;

// ============================================================================
// Fee Constants
// ============================================================================

/// Default swap fee numerator (0.3%)
pub const DEFAULT_FEE_NUMERATOR: u128 = 3;

/// Default swap fee denominator
pub const DEFAULT_FEE_DENOMINATOR: u128 = 1_000;

/// Largest accepted fee denominator. Keeps `balance * D` products of
/// 112-bit reserves inside 256 bits.
pub const MAX_FEE_DENOMINATOR: u128 = 1 << 32;

// ============================================================================
// Domain Tags
// ============================================================================

/// Domain for registry identities
pub const REGISTRY_ID_DOMAIN: &[u8] = b"PAIRSWAP_REGISTRY_V1";

/// Domain for pool identities derived from (registry, asset0, asset1)
pub const POOL_ID_DOMAIN: &[u8] = b"PAIRSWAP_POOL_V1";

/// Domain for router identities
pub const ROUTER_ID_DOMAIN: &[u8] = b"PAIRSWAP_ROUTER_V1";

/// Domain for asset identities
pub const ASSET_ID_DOMAIN: &[u8] = b"PAIRSWAP_ASSET_V1";

/// Domain for permit separators
pub const PERMIT_DOMAIN: &[u8] = b"PAIRSWAP_PERMIT_DOMAIN_V1";

/// Type tag mixed into every permit struct hash
pub const PERMIT_TYPEHASH: &[u8] =
    b"Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)";

/// Prefix of signed permit digests
pub const PERMIT_DIGEST_PREFIX: &[u8; 2] = b"\x19\x01";
