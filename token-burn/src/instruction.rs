use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::program_error::ProgramError;
use solana_program::pubkey::Pubkey;

use crate::signers::add_signers;

type Result<T = (), E = ProgramError> = core::result::Result<T, E>;

/// Length of the Burn instruction data: opcode and 64-bit amount.
pub const BURN_DATA_LEN: usize = 1 + 8;

/// Length of the BurnChecked instruction data: opcode, 64-bit amount and
/// decimals.
pub const BURN_CHECKED_DATA_LEN: usize = 1 + 8 + 1;

/// Opcodes of the SPL Token program instructions.
///
/// The opcode is the first byte of the instruction data and selects the
/// operation the token program executes.  Only [`TokenInstruction::Burn`] and
/// [`TokenInstruction::BurnChecked`] are constructed by this crate; the rest
/// is listed so that decoded opcodes can be reported by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenInstruction {
    InitializeMint = 0,
    InitializeAccount = 1,
    InitializeMultisig = 2,
    Transfer = 3,
    Approve = 4,
    Revoke = 5,
    SetAuthority = 6,
    MintTo = 7,
    Burn = 8,
    CloseAccount = 9,
    FreezeAccount = 10,
    ThawAccount = 11,
    TransferChecked = 12,
    ApproveChecked = 13,
    MintToChecked = 14,
    BurnChecked = 15,
    InitializeAccount2 = 16,
    SyncNative = 17,
    InitializeAccount3 = 18,
    InitializeMultisig2 = 19,
    InitializeMint2 = 20,
    GetAccountDataSize = 21,
    InitializeImmutableOwner = 22,
    AmountToUiAmount = 23,
    UiAmountToAmount = 24,
}

impl TokenInstruction {
    /// All opcodes indexed by their value.
    const ALL: [Self; 25] = [
        Self::InitializeMint,
        Self::InitializeAccount,
        Self::InitializeMultisig,
        Self::Transfer,
        Self::Approve,
        Self::Revoke,
        Self::SetAuthority,
        Self::MintTo,
        Self::Burn,
        Self::CloseAccount,
        Self::FreezeAccount,
        Self::ThawAccount,
        Self::TransferChecked,
        Self::ApproveChecked,
        Self::MintToChecked,
        Self::BurnChecked,
        Self::InitializeAccount2,
        Self::SyncNative,
        Self::InitializeAccount3,
        Self::InitializeMultisig2,
        Self::InitializeMint2,
        Self::GetAccountDataSize,
        Self::InitializeImmutableOwner,
        Self::AmountToUiAmount,
        Self::UiAmountToAmount,
    ];
}

impl From<TokenInstruction> for u8 {
    fn from(opcode: TokenInstruction) -> u8 { opcode as u8 }
}

impl TryFrom<u8> for TokenInstruction {
    type Error = u8;

    /// Converts opcode byte into the instruction; returns the byte back if
    /// it doesn’t name any known instruction.
    fn try_from(opcode: u8) -> Result<Self, u8> {
        Self::ALL.get(usize::from(opcode)).copied().ok_or(opcode)
    }
}


/// Constructs a Burn instruction.
///
/// Burns `amount` tokens (expressed in the smallest unit of the token) from
/// token `account` of given `mint`.  `owner` is the owner of the account or
/// its delegate.  If `owner` is a multisig account, `multi_signers` lists the
/// signers authorising the burn; otherwise it must be empty and `owner` signs.
///
/// `amount` may be of any integer type.  Returns `ArithmeticOverflow` error
/// if it’s negative or doesn’t fit in 64 bits.  Accounts aren’t validated in
/// any way; malformed input is going to be rejected by the token program when
/// the transaction executes.
///
/// If `program_id` is not given, the instruction calls the SPL Token program
/// ([`crate::TOKEN_PROGRAM_ID`]).
///
/// # Example
///
/// ```
/// # use solana_program::pubkey::Pubkey;
/// let account = Pubkey::new_from_array([1; 32]);
/// let mint = Pubkey::new_from_array([2; 32]);
/// let owner = Pubkey::new_from_array([3; 32]);
/// let ix = solana_token_burn::instruction::burn(
///     &account, &mint, &owner, &[], 1000u64, None,
/// ).unwrap();
/// assert_eq!(&[8, 0xE8, 3, 0, 0, 0, 0, 0, 0], &ix.data[..]);
/// assert_eq!(solana_token_burn::TOKEN_PROGRAM_ID, ix.program_id);
/// ```
pub fn burn(
    account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
    multi_signers: &[&Pubkey],
    amount: impl TryInto<u64>,
    program_id: Option<&Pubkey>,
) -> Result<Instruction> {
    let amount = check_amount(amount)?;
    let data = [
        /* opcode: */ &[u8::from(TokenInstruction::Burn)][..],
        /* amount: */ &amount.to_le_bytes()[..],
    ]
    .concat();
    Ok(new_instruction(account, mint, owner, multi_signers, program_id, data))
}

/// Constructs a BurnChecked instruction.
///
/// Behaves like [`burn`] except that the instruction additionally carries
/// number of `decimals` of the mint.  The token program fails the instruction
/// if it doesn’t match the mint, which protects against burning wrong amount
/// when the caller has the decimals wrong.
pub fn burn_checked(
    account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
    multi_signers: &[&Pubkey],
    amount: impl TryInto<u64>,
    decimals: u8,
    program_id: Option<&Pubkey>,
) -> Result<Instruction> {
    let amount = check_amount(amount)?;
    let data = [
        /* opcode: */ &[u8::from(TokenInstruction::BurnChecked)][..],
        /* amount: */ &amount.to_le_bytes()[..],
        /* decimals: */ &[decimals][..],
    ]
    .concat();
    Ok(new_instruction(account, mint, owner, multi_signers, program_id, data))
}

/// Checks that amount fits in unsigned 64-bit integer.
fn check_amount(amount: impl TryInto<u64>) -> Result<u64> {
    amount.try_into().map_err(|_| ProgramError::ArithmeticOverflow)
}

/// Builds instruction with the account layout shared by Burn and BurnChecked.
fn new_instruction(
    account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
    multi_signers: &[&Pubkey],
    program_id: Option<&Pubkey>,
    data: Vec<u8>,
) -> Instruction {
    let mut accounts = Vec::with_capacity(3 + multi_signers.len());
    accounts.push(AccountMeta::new(*account, false));
    accounts.push(AccountMeta::new(*mint, false));
    add_signers(&mut accounts, owner, multi_signers);
    Instruction {
        program_id: *program_id.unwrap_or(&crate::TOKEN_PROGRAM_ID),
        accounts,
        data,
    }
}
