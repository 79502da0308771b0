use core::str::FromStr;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use solana_sdk::instruction::Instruction;
use solana_sdk::program_error::ProgramError;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signer;
use solana_token_burn::instruction::{burn, burn_checked};
use tracing_subscriber::EnvFilter;


/// Location of the keypair relative to home directory used when
/// `SOLANA_KEYPAIR` isn’t set.  Same as Solana CLI’s default.
const DEFAULT_KEYPAIR_PATH: &str = ".config/solana/id.json";


type Result<T = (), E = Error> = core::result::Result<T, E>;


/// `usage: burn-cli <account> <mint> <amount> [<options>]`
fn main() -> ExitCode {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}


/// Sets up logging to stderr.  Filter is taken from `RUST_LOG` and defaults
/// to `info`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}


/// Executes the program.
fn run() -> Result {
    let args = parse_args(std::env::args().skip(1))?;
    let owner = match args.owner {
        Some(owner) => owner,
        None => read_owner()?,
    };
    let instruction = build_instruction(&args, &owner)?;
    tracing::info!(
        program = %instruction.program_id,
        accounts = instruction.accounts.len(),
        checked = args.decimals.is_some(),
        "Built burn instruction"
    );
    print!("{}", Printable(&instruction));
    Ok(())
}


/// Parsed command line arguments.
#[derive(Debug, PartialEq, Eq)]
struct Args {
    account: Pubkey,
    mint: Pubkey,
    /// Parsed wider than the instruction accepts; range is checked when
    /// building the instruction.
    amount: u128,
    owner: Option<Pubkey>,
    signers: Vec<Pubkey>,
    decimals: Option<u8>,
    program_id: Option<Pubkey>,
}


/// Parses the command line arguments (without the program name).
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut owner = None;
    let mut signers = Vec::new();
    let mut decimals = None;
    let mut program_id = None;
    let mut positional = Vec::with_capacity(3);

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if !arg.starts_with("--") {
            positional.push(arg);
            continue;
        }
        match arg.as_str() {
            "--owner" => owner = Some(parse_value("owner", args.next())?),
            "--signer" => signers.push(parse_value("signer", args.next())?),
            "--decimals" => {
                decimals = Some(parse_value("decimals", args.next())?)
            }
            "--program" => {
                program_id = Some(parse_value("program", args.next())?)
            }
            "--token-2022" => {
                program_id = Some(solana_token_burn::TOKEN_2022_PROGRAM_ID)
            }
            _ => return Err(Error::Usage),
        }
    }

    let [account, mint, amount] =
        <[String; 3]>::try_from(positional).map_err(|_| Error::Usage)?;
    Ok(Args {
        account: parse_value("account", Some(account))?,
        mint: parse_value("mint", Some(mint))?,
        amount: parse_value("amount", Some(amount))?,
        owner,
        signers,
        decimals,
        program_id,
    })
}


/// Parses value of an argument; missing value is a usage error.
fn parse_value<T: FromStr>(
    name: &'static str,
    value: Option<String>,
) -> Result<T> {
    let value = value.ok_or(Error::Usage)?;
    T::from_str(&value).map_err(|_| Error::InvalidArg(name, value))
}


/// Returns public key of the keypair from `SOLANA_KEYPAIR` or the default
/// location.
fn read_owner() -> Result<Pubkey> {
    let path = keypair_path(
        std::env::var_os("SOLANA_KEYPAIR"),
        std::env::var_os("HOME"),
    )?;
    read_pubkey(&path)
}


/// Chooses the keypair file: explicit `keypair` path if given, otherwise
/// [`DEFAULT_KEYPAIR_PATH`] under `home`.
fn keypair_path(
    keypair: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf> {
    match (keypair, home) {
        (Some(path), _) => Ok(PathBuf::from(path)),
        (None, Some(home)) => {
            Ok(PathBuf::from(home).join(DEFAULT_KEYPAIR_PATH))
        }
        (None, None) => Err(Error::Msg("HOME not set")),
    }
}


/// Reads keypair file and returns its public key.
fn read_pubkey(path: &Path) -> Result<Pubkey> {
    tracing::debug!(path = %path.display(), "Reading owner keypair");
    let keypair = solana_sdk::signer::keypair::read_keypair_file(path)?;
    Ok(keypair.pubkey())
}


/// Builds Burn or, if decimals were given, BurnChecked instruction.
fn build_instruction(args: &Args, owner: &Pubkey) -> Result<Instruction> {
    let signers = args.signers.iter().collect::<Vec<_>>();
    let program_id = args.program_id.as_ref();
    Ok(match args.decimals {
        None => burn(
            &args.account,
            &args.mint,
            owner,
            &signers,
            args.amount,
            program_id,
        )?,
        Some(decimals) => burn_checked(
            &args.account,
            &args.mint,
            owner,
            &signers,
            args.amount,
            decimals,
            program_id,
        )?,
    })
}


/// Human-readable form of an instruction with base58-encoded data.
struct Printable<'a>(&'a Instruction);

impl core::fmt::Display for Printable<'_> {
    fn fmt(&self, fmtr: &mut core::fmt::Formatter) -> core::fmt::Result {
        let instruction = self.0;
        writeln!(fmtr, "Program: {}", instruction.program_id)?;
        for (index, meta) in instruction.accounts.iter().enumerate() {
            let flags = match (meta.is_writable, meta.is_signer) {
                (true, true) => "writable, signer",
                (true, false) => "writable",
                (false, true) => "signer",
                (false, false) => "readonly",
            };
            writeln!(fmtr, "Account {index}: {} [{flags}]", meta.pubkey)?;
        }
        let data = bs58::encode(&instruction.data).into_string();
        writeln!(fmtr, "Data: {data}")
    }
}


#[derive(Debug, derive_more::From, derive_more::Display)]
enum Error {
    #[display(
        "usage: burn-cli <account> <mint> <amount> [--owner <pubkey>] \
         [--signer <pubkey>]... [--decimals <n>] \
         [--program <pubkey> | --token-2022]"
    )]
    #[from(ignore)]
    Usage,
    #[display("invalid {_0}: {_1}")]
    #[from(ignore)]
    InvalidArg(&'static str, String),
    Msg(&'static str),
    Prog(ProgramError),
    Box(Box<dyn std::error::Error>),
}


#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    const ACCOUNT: Pubkey = Pubkey::new_from_array([1; 32]);
    const MINT: Pubkey = Pubkey::new_from_array([2; 32]);
    const OWNER: Pubkey = Pubkey::new_from_array([3; 32]);
    const S1: Pubkey = Pubkey::new_from_array([4; 32]);
    const S2: Pubkey = Pubkey::new_from_array([5; 32]);

    fn strs(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    fn base_args(amount: &str) -> Vec<String> {
        vec![ACCOUNT.to_string(), MINT.to_string(), amount.to_string()]
    }

    #[test]
    fn test_parse_positional() {
        assert_eq!(
            Args {
                account: ACCOUNT,
                mint: MINT,
                amount: 1000,
                owner: None,
                signers: Vec::new(),
                decimals: None,
                program_id: None,
            },
            parse_args(base_args("1000")).unwrap()
        );
    }

    #[test]
    fn test_parse_options() {
        let mut list = base_args("5");
        list.extend(strs(&["--decimals", "9", "--token-2022"]));
        list.extend(["--owner".into(), OWNER.to_string()]);
        list.extend(["--signer".into(), S1.to_string()]);
        list.extend(["--signer".into(), S2.to_string()]);
        assert_eq!(
            Args {
                account: ACCOUNT,
                mint: MINT,
                amount: 5,
                owner: Some(OWNER),
                signers: vec![S1, S2],
                decimals: Some(9),
                program_id: Some(solana_token_burn::TOKEN_2022_PROGRAM_ID),
            },
            parse_args(list).unwrap()
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_args(Vec::new()), Err(Error::Usage)));
        let mut list = base_args("1");
        list.push("extra".into());
        assert!(matches!(parse_args(list), Err(Error::Usage)));
        let mut list = base_args("1");
        list.push("--owner".into());
        assert!(matches!(parse_args(list), Err(Error::Usage)));
        let mut list = base_args("1");
        list.push("--bogus".into());
        assert!(matches!(parse_args(list), Err(Error::Usage)));

        assert!(matches!(
            parse_args(base_args("-1")),
            Err(Error::InvalidArg("amount", _))
        ));
        assert!(matches!(
            parse_args(strs(&["not-a-key", "x", "1"])),
            Err(Error::InvalidArg("account", _))
        ));
        let mut list = base_args("1");
        list.extend(strs(&["--decimals", "256"]));
        assert!(matches!(
            parse_args(list),
            Err(Error::InvalidArg("decimals", _))
        ));
    }

    #[test]
    fn test_parse_program() {
        let parse = |extra: Vec<String>| {
            let mut list = base_args("1");
            list.extend(extra);
            parse_args(list).map(|args| args.program_id)
        };
        let program = Pubkey::new_from_array([7; 32]);
        let token_2022 = solana_token_burn::TOKEN_2022_PROGRAM_ID;

        let got = parse(vec!["--program".into(), program.to_string()]);
        assert_eq!(Some(program), got.unwrap());
        let got = parse(vec![
            "--program".into(),
            program.to_string(),
            "--token-2022".into(),
        ]);
        assert_eq!(Some(token_2022), got.unwrap());
        let got = parse(vec![
            "--token-2022".into(),
            "--program".into(),
            program.to_string(),
        ]);
        assert_eq!(Some(program), got.unwrap());

        assert!(matches!(
            parse(strs(&["--program", "not-a-key"])),
            Err(Error::InvalidArg("program", _))
        ));
    }

    #[test]
    fn test_keypair_path() {
        let got = keypair_path(
            Some("/tmp/owner.json".into()),
            Some("/home/alice".into()),
        );
        assert_eq!(PathBuf::from("/tmp/owner.json"), got.unwrap());
        let got = keypair_path(None, Some("/home/alice".into()));
        assert_eq!(
            PathBuf::from("/home/alice/.config/solana/id.json"),
            got.unwrap()
        );
        assert!(matches!(
            keypair_path(None, None),
            Err(Error::Msg("HOME not set"))
        ));
    }

    #[test]
    fn test_read_pubkey() {
        use solana_sdk::signer::keypair::{write_keypair_file, Keypair};

        let keypair = Keypair::new();
        let path = std::env::temp_dir()
            .join(format!("burn-cli-test-{}.json", std::process::id()));
        write_keypair_file(&keypair, &path).unwrap();
        let got = read_pubkey(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(keypair.pubkey(), got.unwrap());

        assert!(matches!(read_pubkey(&path), Err(Error::Box(_))));
    }

    #[test]
    fn test_build_instruction() {
        let args = parse_args(base_args("1000")).unwrap();
        let ix = build_instruction(&args, &OWNER).unwrap();
        assert_eq!(solana_token_burn::TOKEN_PROGRAM_ID, ix.program_id);
        assert_eq!(vec![8, 0xE8, 0x03, 0, 0, 0, 0, 0, 0], ix.data);

        let mut list = base_args("1000");
        list.extend(strs(&["--decimals", "2"]));
        let args = parse_args(list).unwrap();
        let ix = build_instruction(&args, &OWNER).unwrap();
        assert_eq!(vec![15, 0xE8, 0x03, 0, 0, 0, 0, 0, 0, 2], ix.data);
    }

    #[test]
    fn test_build_amount_overflow() {
        let amount = (u128::from(u64::MAX) + 1).to_string();
        let args = parse_args(base_args(&amount)).unwrap();
        assert!(matches!(
            build_instruction(&args, &OWNER),
            Err(Error::Prog(ProgramError::ArithmeticOverflow))
        ));
    }

    #[test]
    fn test_printable() {
        let ix = burn(&ACCOUNT, &MINT, &OWNER, &[&S1], 1000u64, None).unwrap();
        let data = bs58::encode([8u8, 0xE8, 3, 0, 0, 0, 0, 0, 0]).into_string();
        let want = format!(
            "Program: {}\nAccount 0: {ACCOUNT} [writable]\nAccount 1: {MINT} \
             [writable]\nAccount 2: {OWNER} [readonly]\nAccount 3: {S1} \
             [signer]\nData: {data}\n",
            solana_token_burn::TOKEN_PROGRAM_ID,
        );
        assert_eq!(want, Printable(&ix).to_string());
    }
}
