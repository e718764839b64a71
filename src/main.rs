// Copyright 2023 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use sevreport::envelope::{self, Capabilities, Nonce};
use sevreport::report::{validate, AttestationReport, CertificateChain, Verdict};
use sevreport::store::{MemoTrustAnchorStore, PlatformFamily};
use std::error::Error;
use std::fs;
use std::process;

#[derive(Parser)]
enum SevReportCli {
    Verify(VerifyArgs),
    Nonce(NonceArgs),
}

#[derive(Debug, clap::Args)]
#[command(author, version, long_about = None,
    about = "Verify the supplied SEV attestation report against the PEK found \
    in the supplied certificate chain")]
struct VerifyArgs {
    /// Certificate chain: raw bytes or a query-sev-capabilities response
    #[arg(short, long, default_value = "capabilities.json")]
    chain: String,

    /// Attestation report: raw bytes or a query-sev-attestation-report
    /// response, possibly base64 wrapped
    #[arg(short, long, default_value = "report.json")]
    report: String,

    /// The mnonce sent with the report request, base64 encoded
    #[arg(short, long)]
    nonce: String,

    /// Trust anchor store; the bundled anchors are used if absent
    #[arg(short, long)]
    tastore: Option<String>,

    #[arg(short, long, default_value = "rome")]
    family: PlatformFamily,
}

#[derive(Debug, clap::Args)]
#[command(author, version, long_about = None,
    about = "Generate a fresh mnonce and print the matching QMP request")]
struct NonceArgs {}

fn main() {
    env_logger::init();

    match SevReportCli::parse() {
        SevReportCli::Verify(args) => match verify(&args) {
            Ok(Verdict::Verified) => println!("verification successful"),
            Ok(Verdict::Rejected(e)) => {
                eprintln!("verification failed: {e}");
                process::exit(1);
            }
            Err(e) => {
                eprintln!("verification failed: {e}");
                process::exit(2);
            }
        },

        SevReportCli::Nonce(_) => match Nonce::generate() {
            Ok(n) => {
                println!("{}", n.to_base64());
                println!("{}", envelope::attestation_report_request(&n));
            }
            Err(e) => {
                eprintln!("nonce generation failed: {e}");
                process::exit(2);
            }
        },
    }
}

fn verify(args: &VerifyArgs) -> Result<Verdict, Box<dyn Error>> {
    let tas = match &args.tastore {
        Some(f) => {
            let j = fs::read_to_string(f)?;
            let mut tas = MemoTrustAnchorStore::new();
            tas.load_json(&j)?;
            tas
        }
        None => MemoTrustAnchorStore::builtin()?,
    };

    let c = fs::read(&args.chain)?;
    let cert_chain = match json_text(&c) {
        Some(j) => Capabilities::decode(j)?.cert_chain()?,
        None => c,
    };

    let report = report_bytes(fs::read(&args.report)?)?;

    let nonce = Nonce::from_base64(&args.nonce)?;

    let chain = CertificateChain::parse_with(&cert_chain, &tas, args.family)?;

    if let Ok(ar) = AttestationReport::decode(&report) {
        log::info!(
            "launch digest {} policy {:#x}",
            hex::encode(ar.launch_digest),
            ar.policy
        );
    }

    Ok(validate(chain.signing_cert(), &report, nonce.as_bytes()))
}

/// A JSON response is decoded strictly.  Anything else is tried as a base64
/// wrapped response and otherwise taken as a raw report.
fn report_bytes(r: Vec<u8>) -> Result<Vec<u8>, envelope::Error> {
    if let Some(j) = json_text(&r) {
        return envelope::decode_report_response(j);
    }

    let decoded = std::str::from_utf8(&r)
        .ok()
        .and_then(|s| envelope::decode_report_response(s).ok());

    Ok(decoded.unwrap_or(r))
}

fn json_text(b: &[u8]) -> Option<&str> {
    std::str::from_utf8(b)
        .ok()
        .filter(|s| s.trim_start().starts_with('{'))
}
