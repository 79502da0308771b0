//! Parsing of Burn and BurnChecked instructions.
//!
//! Inverse of [`crate::instruction::burn`] and
//! [`crate::instruction::burn_checked`].  Meant for off-chain tooling which
//! wants to inspect instructions before signing them.

use solana_program::instruction::Instruction;
use solana_program::program_error::ProgramError;
use solana_program::pubkey::Pubkey;

use crate::instruction::{BURN_CHECKED_DATA_LEN, BURN_DATA_LEN};
use crate::TokenInstruction;

/// Accounts and arguments of a decoded Burn or BurnChecked instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedBurn {
    /// Token program the instruction calls.
    pub program_id: Pubkey,
    /// Token account the tokens are burnt from.
    pub account: Pubkey,
    /// Mint of the token account.
    pub mint: Pubkey,
    /// Owner or delegate of the account; a multisig if `multi_signers` isn’t
    /// empty.
    pub owner: Pubkey,
    /// Signers of the multisig `owner`; empty if owner signs directly.
    pub multi_signers: Vec<Pubkey>,
    /// Number of tokens burnt in the smallest unit of the token.
    pub amount: u64,
    /// Number of decimals of the mint; `Some` only for BurnChecked.
    pub decimals: Option<u8>,
}

/// Reason an instruction could not be decoded as a burn.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, derive_more::Display, derive_more::Error,
)]
pub enum DecodeError {
    #[display("instruction is addressed to a different program")]
    IncorrectProgramId,
    #[display("burn requires at least three accounts")]
    NotEnoughAccountKeys,
    #[display("malformed instruction data")]
    InvalidInstructionData,
    #[display("unknown token instruction opcode {_0}")]
    UnknownOpcode(#[error(not(source))] u8),
    #[display("expected Burn or BurnChecked, got {_0:?}")]
    UnexpectedInstruction(#[error(not(source))] TokenInstruction),
}

impl From<DecodeError> for ProgramError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::IncorrectProgramId => Self::IncorrectProgramId,
            DecodeError::NotEnoughAccountKeys => Self::NotEnoughAccountKeys,
            DecodeError::InvalidInstructionData |
            DecodeError::UnknownOpcode(_) |
            DecodeError::UnexpectedInstruction(_) => {
                Self::InvalidInstructionData
            }
        }
    }
}

/// Decodes a Burn or BurnChecked instruction.
///
/// `program_id` is the token program the instruction is expected to call;
/// defaults to [`crate::TOKEN_PROGRAM_ID`].  Accounts past the owner are
/// interpreted as multisig signers.  Signer and writable flags of the accounts
/// aren’t checked.
pub fn decode_burn(
    instruction: &Instruction,
    program_id: Option<&Pubkey>,
) -> Result<DecodedBurn, DecodeError> {
    let program_id = program_id.unwrap_or(&crate::TOKEN_PROGRAM_ID);
    if instruction.program_id != *program_id {
        return Err(DecodeError::IncorrectProgramId);
    }

    let (account, mint, owner, multi_signers) = match &instruction.accounts[..]
    {
        [account, mint, owner, rest @ ..] => {
            (account.pubkey, mint.pubkey, owner.pubkey, rest)
        }
        _ => return Err(DecodeError::NotEnoughAccountKeys),
    };

    let (opcode, data) = instruction
        .data
        .split_first()
        .ok_or(DecodeError::InvalidInstructionData)?;
    let opcode = TokenInstruction::try_from(*opcode)
        .map_err(DecodeError::UnknownOpcode)?;
    let (amount, decimals) = match opcode {
        TokenInstruction::Burn if data.len() == BURN_DATA_LEN - 1 => {
            (data, None)
        }
        TokenInstruction::BurnChecked
            if data.len() == BURN_CHECKED_DATA_LEN - 1 =>
        {
            let (decimals, amount) = data
                .split_last()
                .ok_or(DecodeError::InvalidInstructionData)?;
            (amount, Some(*decimals))
        }
        TokenInstruction::Burn | TokenInstruction::BurnChecked => {
            return Err(DecodeError::InvalidInstructionData);
        }
        _ => return Err(DecodeError::UnexpectedInstruction(opcode)),
    };
    let amount = <[u8; 8]>::try_from(amount)
        .map_err(|_| DecodeError::InvalidInstructionData)?;

    Ok(DecodedBurn {
        program_id: *program_id,
        account,
        mint,
        owner,
        multi_signers: multi_signers.iter().map(|meta| meta.pubkey).collect(),
        amount: u64::from_le_bytes(amount),
        decimals,
    })
}
