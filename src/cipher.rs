//! Software substitution-table round for hosts without AES instructions.
//!
//! Two fixed 256-entry tables map each byte value to a 32-bit word: the
//! forward table carries the AES S-box (each byte zero-extended), the
//! reverse table its inverse. Both are built at compile time from the
//! GF(2⁸) multiplicative inverse and the affine transform, so they live in
//! the process image as plain constants with no initialization or teardown.
//!
//! [`enc_round`] is deliberately *not* a standard AES round: it substitutes
//! the four input bytes, XORs the four table words together and XORs in the
//! round key, omitting the ShiftRows/MixColumns diffusion a real round
//! would apply. Existing call sites in the dataset builder depend on this
//! exact reduced construction, so it is preserved bit-for-bit rather than
//! corrected toward the textbook round. Do not use this module as a cipher.

/// Carry-less doubling in GF(2⁸) modulo the AES polynomial 0x11B.
const fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        let carry = a & 0x80;
        a <<= 1;
        if carry != 0 {
            a ^= 0x1B;
        }
        b >>= 1;
    }
    product
}

/// Multiplicative inverse via a^254 (Fermat); 0 maps to 0 as in AES.
const fn gf_inv(a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let mut result = 1u8;
    let mut base = a;
    let mut exp = 254u32;
    while exp > 0 {
        if exp & 1 == 1 {
            result = gf_mul(result, base);
        }
        base = gf_mul(base, base);
        exp >>= 1;
    }
    result
}

/// The AES S-box: inverse then affine transform.
const fn sbox_byte(x: u8) -> u8 {
    let inv = gf_inv(x);
    inv ^ inv.rotate_left(1)
        ^ inv.rotate_left(2)
        ^ inv.rotate_left(3)
        ^ inv.rotate_left(4)
        ^ 0x63
}

const fn build_enc_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = sbox_byte(i as u8) as u32;
        i += 1;
    }
    table
}

const fn build_dec_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        table[sbox_byte(i as u8) as usize] = i as u32;
        i += 1;
    }
    table
}

/// Forward substitution table: byte value → S-box word.
pub static SBOX_ENC: [u32; 256] = build_enc_table();

/// Reverse substitution table: S-box word → original byte.
pub static SBOX_DEC: [u32; 256] = build_dec_table();

/// One reduced encryption round: substitute the four bytes of `input`, XOR
/// the four table words together, XOR with the round key.
///
/// See the module docs for why this is not a standard AES round.
#[inline]
pub fn enc_round(input: u32, round_key: &u32) -> u32 {
    let b0 = (input & 0xFF) as usize;
    let b1 = ((input >> 8) & 0xFF) as usize;
    let b2 = ((input >> 16) & 0xFF) as usize;
    let b3 = ((input >> 24) & 0xFF) as usize;

    (SBOX_ENC[b0] ^ SBOX_ENC[b1] ^ SBOX_ENC[b2] ^ SBOX_ENC[b3]) ^ *round_key
}

/// Rotates each 32-bit word left by 8 bits, the lane rotation the dataset
/// transform applies between rounds.
#[inline]
pub fn rotate_words8(data: &mut [u32]) {
    for word in data.iter_mut() {
        *word = word.rotate_left(8);
    }
}

/// The reduced SubBytes stand-in: XORs the S-box affine constant into every
/// byte. Preserved as-is for call sites that expect exactly this transform.
#[inline]
pub fn sub_bytes_xor(state: &mut [u8]) {
    for byte in state.iter_mut() {
        *byte ^= 0x63;
    }
}
