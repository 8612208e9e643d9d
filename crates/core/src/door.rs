//! Periodic door schedule arithmetic.
//! This module exists so open/closed reasoning stays a pure function of
//! frequency and turn number. It does not own memory or planning policy.
//!
//! Frequency convention, applied everywhere: `0` is the boundary sentinel and
//! is never open, `1` is open on every turn, and `f > 1` is open exactly on
//! turns `t` with `t % f == 0`.

/// Whether a door with the given frequency is open at an absolute turn.
pub fn is_open(frequency: u32, turn: u64) -> bool {
    match frequency {
        0 => false,
        f => turn % u64::from(f) == 0,
    }
}

pub fn lcm(a: u64, b: u64) -> u64 {
    debug_assert!(a > 0 && b > 0);
    a / gcd(a, b) * b
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Smallest wait `w >= 0` such that both doors of a crossing are open at
/// `turn + w`. Doors are purely periodic, so if no offset inside one combined
/// LCM period works, none ever will. `None` iff either side is the boundary
/// sentinel.
pub fn aligned_wait(out_frequency: u32, in_frequency: u32, turn: u64) -> Option<u64> {
    if out_frequency == 0 || in_frequency == 0 {
        return None;
    }
    let period = lcm(u64::from(out_frequency), u64::from(in_frequency));
    (0..period).find(|wait| is_open(out_frequency, turn + wait) && is_open(in_frequency, turn + wait))
}
