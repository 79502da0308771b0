// solana-token-burn — builder for SPL Token Burn instructions
// © 2024 by Composable Foundation
// © 2025 by Michał Nazarewicz <mina86@mina86.com>
//
// This program is free software; you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation; either version 2 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program; if not, see <https://www.gnu.org/licenses/>.

//! Client-side helpers for constructing SPL Token Burn instructions.
//!
//! Burning removes tokens from a token account and decreases the supply of
//! the mint.  The instruction is executed by the SPL Token program (or the
//! Token-2022 program which shares the encoding) and must be authorised by the
//! owner of the token account.  If the owner is a multisig account, the owner
//! is passed as a non-signer followed by the signers of the multisig.
//!
//! [`instruction::burn`] and [`instruction::burn_checked`] construct the
//! instructions ready to be included in a transaction.  When built with the
//! `decode` feature, [`decode::decode_burn`] parses such instruction back.
//!
//! The instruction data is a single opcode byte followed by a little-endian
//! 64-bit amount (and for BurnChecked a decimals byte):
//!
//! ```text
//! +--------+----------------------+------------+
//! | opcode |   amount (u64 LE)    | [decimals] |
//! +--------+----------------------+------------+
//!  0        1                      9
//! ```
//!
//! ## Features
#![doc = document_features::document_features!()]

use solana_program::pubkey::Pubkey;

#[cfg(feature = "decode")]
pub mod decode;
pub mod instruction;
pub mod signers;

pub use instruction::TokenInstruction;

/// Address of the SPL Token program.
///
/// This is the program [`instruction::burn`] targets when no program id is
/// given.
pub const TOKEN_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// Address of the Token-2022 program.
///
/// Token-2022 uses the same encoding for Burn and BurnChecked so the builders
/// in this crate can be used with it by passing this id explicitly.
pub const TOKEN_2022_PROGRAM_ID: Pubkey =
    solana_program::pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");
