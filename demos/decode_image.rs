//! EEPROM image decode example.
//!
//! Loads an MT7915 EEPROM dump from a file, runs the initialization
//! sequence against it, and prints the derived capabilities and the
//! target TX power table.
//!
//! Usage: cargo run --example decode_image -- <eeprom.bin>

use mt7915_eeprom::{Band, BlockFetcher, Channel, ImageFetcher, Mt7915Device};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: decode_image <eeprom.bin>")?;
    let dump = std::fs::read(&path)?;
    println!("Read {} bytes from {path}", dump.len());

    let mut dev = Mt7915Device::new(BlockFetcher::new(ImageFetcher::new(dump)));
    dev.init()?;

    let cap = dev.hardware_capability().ok_or("device not ready")?;
    println!("\nDecoded EEPROM contents:");
    println!("  Version:      0x{:02X}", dev.eeprom_version());
    if let Some(mac) = dev.mac_address() {
        println!("  MAC address:  {mac}");
    }
    println!("  2.4 GHz:      {}", cap.has_2ghz);
    println!("  5 GHz:        {}", cap.has_5ghz);
    println!("  Chain mask:   0x{:X} ({} chains)", cap.chain_mask, cap.chain_count());

    let mut channels = Vec::new();
    if cap.supports(Band::Ghz2) {
        channels.extend([1, 6, 11].map(|c| Channel::new(Band::Ghz2, c)));
    }
    if cap.supports(Band::Ghz5) {
        channels.extend([36, 52, 100, 149].map(|c| Channel::new(Band::Ghz5, c)));
    }

    println!("\nTarget power (raw):");
    for ch in channels {
        print!("  {:?} {:>3}: ", ch.band, ch.hw_value);
        for chain in 0..cap.chain_count() as u8 {
            print!("{:02X} ", dev.target_power(ch, chain)?);
        }
        println!();
    }

    println!(
        "\n{} firmware block reads",
        dev.fetcher().source().fetch_count()
    );

    Ok(())
}
