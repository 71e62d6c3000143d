//! Command-line driver for AES-128-CBC.

#![forbid(unsafe_code)]

mod trace;

use std::fs;
use std::path::{Path, PathBuf};

use aes_cbc::{Aes128Cbc, Iv};
use aes_core::{Aes128Key, BLOCK_SIZE};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::trace::ConsoleTrace;

const DEMO_TEXT: &str = "Hello, AES! Привет, AES! 1234";

/// AES-128-CBC CLI.
#[derive(Parser)]
#[command(name = "aes128cbc", version, author, about = "AES-128 CBC with PKCS#7 padding")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where to read the AES-128 key from.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct KeySource {
    /// AES-128 key as 32 hex characters.
    #[arg(long, value_name = "HEX")]
    key_hex: Option<String>,
    /// File holding the raw 16-byte key.
    #[arg(long, value_name = "FILE")]
    key_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random key and IV, saving the key to a file.
    Keygen {
        /// Output path for the raw key bytes.
        #[arg(long, value_name = "FILE", default_value = "aes_key.bin")]
        out: PathBuf,
        /// Optional RNG seed for reproducible keys.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Encrypt a file, padding it to the block size.
    Enc {
        #[command(flatten)]
        key: KeySource,
        /// IV as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        iv_hex: String,
        /// Input plaintext path.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output ciphertext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Print every intermediate state and round key.
        #[arg(long, default_value_t = false)]
        trace: bool,
    },
    /// Decrypt a file and strip its padding.
    Dec {
        #[command(flatten)]
        key: KeySource,
        /// IV as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        iv_hex: String,
        /// Input ciphertext path (must be a non-empty multiple of 16 bytes).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Print every intermediate state and round key.
        #[arg(long, default_value_t = false)]
        trace: bool,
    },
    /// Generate a key and IV, then encrypt and decrypt a sample text with tracing.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
        /// Where to save the generated key.
        #[arg(long, value_name = "FILE", default_value = "aes_key.bin")]
        key_out: PathBuf,
        /// Text to encrypt.
        #[arg(long, default_value = DEMO_TEXT)]
        text: String,
        /// Skip the per-round trace output.
        #[arg(long, default_value_t = false)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Keygen { out, seed } => cmd_keygen(&out, seed),
        Commands::Enc {
            key,
            iv_hex,
            input,
            output,
            trace,
        } => cmd_enc(&key, &iv_hex, &input, &output, trace),
        Commands::Dec {
            key,
            iv_hex,
            input,
            output,
            trace,
        } => cmd_dec(&key, &iv_hex, &input, &output, trace),
        Commands::Demo {
            seed,
            key_out,
            text,
            quiet,
        } => cmd_demo(seed, &key_out, &text, quiet),
    }
}

fn cmd_keygen(out: &Path, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let key = random_block(&mut rng);
    let iv = random_block(&mut rng);
    fs::write(out, key).with_context(|| format!("write {}", out.display()))?;
    println!("key: {}", hex::encode(key));
    println!("iv: {}", hex::encode(iv));
    println!("key saved to {}", out.display());
    Ok(())
}

fn cmd_enc(key: &KeySource, iv_hex: &str, input: &Path, output: &Path, trace: bool) -> Result<()> {
    let session = Aes128Cbc::new(&load_key(key)?, &parse_iv_hex(iv_hex)?);
    let data = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    let ciphertext = if trace {
        session.encrypt_traced(&data, &mut ConsoleTrace::stdout())
    } else {
        session.encrypt(&data)
    };
    fs::write(output, ciphertext).with_context(|| format!("write {}", output.display()))?;
    Ok(())
}

fn cmd_dec(key: &KeySource, iv_hex: &str, input: &Path, output: &Path, trace: bool) -> Result<()> {
    let session = Aes128Cbc::new(&load_key(key)?, &parse_iv_hex(iv_hex)?);
    let data = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    let plaintext = if trace {
        session.decrypt_traced(&data, &mut ConsoleTrace::stdout())
    } else {
        session.decrypt(&data)
    }
    .with_context(|| format!("decrypt {}", input.display()))?;
    fs::write(output, plaintext).with_context(|| format!("write {}", output.display()))?;
    Ok(())
}

fn cmd_demo(seed: Option<u64>, key_out: &Path, text: &str, quiet: bool) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let key_bytes = random_block(&mut rng);
    let iv = random_block(&mut rng);
    fs::write(key_out, key_bytes).with_context(|| format!("write {}", key_out.display()))?;

    println!("=== AES-128 CBC Mode Implementation ===");
    println!("Original Text: {text}");
    println!("Original Bytes: {}", hex::encode(text.as_bytes()));
    println!();
    println!("Key: {}", hex::encode(key_bytes));
    println!("IV: {}", hex::encode(iv));
    println!();

    let session = Aes128Cbc::new(&Aes128Key::from(key_bytes), &iv);
    let mut console = ConsoleTrace::stdout();

    println!("=== ENCRYPTION PROCESS ===");
    let ciphertext = if quiet {
        session.encrypt(text.as_bytes())
    } else {
        session.encrypt_traced(text.as_bytes(), &mut console)
    };
    println!();
    println!("Ciphertext: {}", hex::encode(&ciphertext));

    println!();
    println!("=== DECRYPTION PROCESS ===");
    let decrypted = if quiet {
        session.decrypt(&ciphertext)
    } else {
        session.decrypt_traced(&ciphertext, &mut console)
    }
    .context("decrypt demo ciphertext")?;
    println!();
    println!("Decrypted Text: {}", String::from_utf8_lossy(&decrypted));
    println!("Decrypted Bytes: {}", hex::encode(&decrypted));

    if decrypted != text.as_bytes() {
        bail!("demo roundtrip failed: decrypted text does not match original");
    }
    println!();
    println!("Success! Decrypted text matches original.");
    Ok(())
}

fn load_key(source: &KeySource) -> Result<Aes128Key> {
    match (&source.key_hex, &source.key_file) {
        (Some(hex_str), _) => parse_key_hex(hex_str),
        (None, Some(path)) => {
            let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
            let key = to_block(&bytes).with_context(|| {
                format!("key file {} must hold exactly 16 bytes", path.display())
            })?;
            Ok(Aes128Key::from(key))
        }
        (None, None) => bail!("either --key-hex or --key-file is required"),
    }
}

fn parse_key_hex(hex_str: &str) -> Result<Aes128Key> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    let key = to_block(&bytes).context("AES-128 key must be 16 bytes (32 hex characters)")?;
    Ok(Aes128Key::from(key))
}

fn parse_iv_hex(hex_str: &str) -> Result<Iv> {
    let bytes = hex::decode(hex_str.trim()).context("decode IV hex")?;
    to_block(&bytes).context("IV must be 16 bytes (32 hex characters)")
}

fn to_block(bytes: &[u8]) -> Result<[u8; BLOCK_SIZE]> {
    if bytes.len() != BLOCK_SIZE {
        bail!("expected {BLOCK_SIZE} bytes, got {}", bytes.len());
    }
    let mut block = [0u8; BLOCK_SIZE];
    block.copy_from_slice(bytes);
    Ok(block)
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    let mut seed_bytes = [0u8; 32];
    match seed {
        Some(value) => seed_bytes[..8].copy_from_slice(&value.to_le_bytes()),
        None => rand::rngs::OsRng.fill_bytes(&mut seed_bytes),
    }
    ChaCha20Rng::from_seed(seed_bytes)
}

fn random_block(rng: &mut impl RngCore) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    rng.fill_bytes(&mut block);
    block
}
