//! Password generation
//!
//! Usability generator for portal passwords. The randomness source does not
//! need to be cryptographically secure. It is a generic parameter; callers
//! pick the RNG (the service uses `thread_rng`).

use rand::Rng;
use rand::seq::SliceRandom;
use shared::models::MemberRecord;

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 15;

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
pub const SYMBOLS: &[u8] = b"!@#$%^&*()";

/// Password of random length in `[MIN_LENGTH, MAX_LENGTH]`
pub fn generate_password<R: Rng + ?Sized>(rng: &mut R) -> String {
    let length = rng.gen_range(MIN_LENGTH..=MAX_LENGTH);
    generate_password_with_length(rng, length)
}

/// Password of a fixed length (at least 4, one per character class)
///
/// Contains at least one uppercase letter, lowercase letter, digit and symbol.
pub fn generate_password_with_length<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let length = length.max(4);
    let alphabet: Vec<u8> = [UPPER, LOWER, DIGITS, SYMBOLS].concat();

    let mut chars: Vec<u8> = [UPPER, LOWER, DIGITS, SYMBOLS]
        .iter()
        .map(|class| class[rng.gen_range(0..class.len())])
        .collect();
    chars.extend((chars.len()..length).map(|_| alphabet[rng.gen_range(0..alphabet.len())]));
    chars.shuffle(rng);

    chars.into_iter().map(char::from).collect()
}

/// Give `member` a password if it has none.
///
/// Returns the updated record and whether a new password was generated.
pub fn assign_credential<R: Rng + ?Sized>(
    mut member: MemberRecord,
    rng: &mut R,
) -> (MemberRecord, bool) {
    if member.has_password() {
        return (member, false);
    }
    member.password = Some(generate_password(rng));
    (member, true)
}
