//! Appending authority accounts to an instruction’s account list.

use solana_program::instruction::AccountMeta;
use solana_program::pubkey::Pubkey;

/// Appends the authority and, for multisig authorities, its signers.
///
/// SPL Token instructions which require authorisation take the authority as
/// the account following the ones the instruction operates on.  If
/// `multi_signers` is empty, `authority` is expected to sign the transaction
/// and is pushed as a read-only signer.  Otherwise `authority` is a multisig
/// account; it’s pushed as a read-only non-signer and each of the
/// `multi_signers` follows as a read-only signer in the order given.
pub fn add_signers(
    accounts: &mut Vec<AccountMeta>,
    authority: &Pubkey,
    multi_signers: &[&Pubkey],
) {
    accounts.reserve(1 + multi_signers.len());
    accounts.push(AccountMeta::new_readonly(
        *authority,
        multi_signers.is_empty(),
    ));
    accounts.extend(
        multi_signers
            .iter()
            .map(|signer| AccountMeta::new_readonly(**signer, true)),
    );
}
