//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use sala_core::{ParamDescriptor, ParamFlags};
use sala_reverb::{ReverbParams, save_state};

#[derive(Args)]
pub struct ParamsArgs {
    /// Print the default state as JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let params = ReverbParams::new();

    if args.json {
        let state = save_state(&params)?;
        println!("{}", String::from_utf8(state)?);
        return Ok(());
    }

    println!("Parameters");
    println!("==========");
    println!();
    println!(
        "  {:8}  {:6}  {:8}  {:8}  {:8}  {}",
        "Name", "ID", "Key", "Default", "Kind", "Range"
    );
    println!(
        "  {:8}  {:6}  {:8}  {:8}  {:8}  {}",
        "----", "--", "---", "-------", "----", "-----"
    );
    for descriptor in params.descriptors() {
        println!(
            "  {:8}  {:6}  {:8}  {:8}  {:8}  {}",
            descriptor.name,
            descriptor.id.0,
            descriptor.string_id,
            descriptor.format_value(descriptor.default),
            kind(descriptor),
            range(descriptor)
        );
    }
    println!();
    println!("Set them with: sala render in.wav out.wav --size 0.8 --mix 0.3 --freeze");

    Ok(())
}

fn kind(descriptor: &ParamDescriptor) -> &'static str {
    if descriptor.flags.contains(ParamFlags::STEPPED) {
        "toggle"
    } else {
        "float"
    }
}

fn range(descriptor: &ParamDescriptor) -> String {
    format!(
        "{} to {}",
        descriptor.format_value(descriptor.min),
        descriptor.format_value(descriptor.max)
    )
}
