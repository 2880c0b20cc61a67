// crates/stakescope-economics/src/token.rs
//
// Denomination constants. Nodes report every amount in lamports; SOL is only
// used for display.

/// Number of lamports in one SOL. 1 SOL = 10^9 lamports.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Convert a lamport amount to SOL as a floating-point value.
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}
