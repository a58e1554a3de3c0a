//! Interactive menu for driving any table variant from a terminal.
//!
//! Prompts for a variant and a capacity, then loops over the table
//! operations until quit. Set `RUST_LOG` to see per-operation diagnostics.

use std::io::{self, BufRead, Write};

use log::{debug, info};
use probemap::{
    ChainedMap, DoubleHashProbeMap, HashFn, HashTable, LinearProbeMap, QuadraticProbeMap,
};

/// Hash shared by every variant: `key mod 29`, non-negative.
fn hash_main(key: &i64) -> u64 {
    key.rem_euclid(29).unsigned_abs()
}

/// Second hash for double hashing, in 1..=7 so it can never return 0.
fn hash_pair(key: &i64) -> u64 {
    7 - key.rem_euclid(7).unsigned_abs()
}

/// Prints a prompt without a trailing newline and flushes it out.
fn prompt(text: &str) -> io::Result<()> {
    print!("{text}");
    io::stdout().flush()
}

/// Reads one line, trimmed. `None` means stdin reached end of file.
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Keeps asking until the caller-supplied parser accepts the line.
fn ask<T>(
    input: &mut impl BufRead,
    first: &str,
    again: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> io::Result<Option<T>> {
    prompt(first)?;
    loop {
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if let Some(value) = parse(&line) {
            return Ok(Some(value));
        }
        prompt(again)?;
    }
}

/// Builds the selected variant behind the shared contract.
fn build_table(variant: u8, capacity: usize) -> Box<dyn HashTable<i64, String>> {
    let first: HashFn<i64> = hash_main;
    let second: HashFn<i64> = hash_pair;

    match variant {
        1 => Box::new(ChainedMap::new(capacity, first)),
        2 => Box::new(LinearProbeMap::new(capacity, first)),
        3 => Box::new(QuadraticProbeMap::new(capacity, first)),
        _ => Box::new(DoubleHashProbeMap::new(capacity, first, second)),
    }
}

/// Reads a key and a value, then inserts.
fn insert(table: &mut dyn HashTable<i64, String>, input: &mut impl BufRead) -> io::Result<()> {
    prompt("Enter key and value: ")?;
    let Some(line) = read_line(input)? else {
        return Ok(());
    };

    let mut parts = line.split_whitespace();
    let key = parts.next().and_then(|token| token.parse::<i64>().ok());
    let value = parts.next();

    match (key, value) {
        (Some(key), Some(value)) => match table.insert(key, value.to_string()) {
            Ok(()) => println!("Inserted!"),
            Err(err) => println!("{err}"),
        },
        _ => println!("Incorrect input. Expected an integer key and a value."),
    }
    Ok(())
}

/// Reads a key for one of the key-addressed operations.
fn read_key(input: &mut impl BufRead) -> io::Result<Option<i64>> {
    prompt("Enter key: ")?;
    let Some(line) = read_line(input)? else {
        return Ok(None);
    };
    match line.parse::<i64>() {
        Ok(key) => Ok(Some(key)),
        Err(_) => {
            println!("Incorrect key. Expected an integer.");
            Ok(None)
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let Some(variant) = ask(
        &mut input,
        "Select type of table (1 - separate chaining, 2 - linear probing, \
         3 - quadratic probing, 4 - double hashing): ",
        "Incorrect type. Try again: ",
        |line| match line.parse::<u8>() {
            Ok(choice @ 1..=4) => Some(choice),
            _ => None,
        },
    )?
    else {
        return Ok(());
    };

    let Some(capacity) = ask(
        &mut input,
        "Enter size: ",
        "Incorrect size. Try again: ",
        |line| match line.parse::<usize>() {
            Ok(size) if size >= 2 => Some(size),
            _ => None,
        },
    )?
    else {
        return Ok(());
    };

    let mut table = build_table(variant, capacity);
    info!("table variant {variant} constructed with capacity {capacity}");

    loop {
        println!();
        println!("What do you want to do?");
        println!("1. Print");
        println!("2. Insert");
        println!("3. Remove");
        println!("4. Find");
        println!("5. Get");
        println!("6. Clear");
        println!("7. Get size");
        println!("8. Quit");

        let Some(item) = ask(&mut input, ">", "Incorrect item. Try again: ", |line| {
            match line.parse::<u8>() {
                Ok(choice @ 1..=8) => Some(choice),
                _ => None,
            }
        })?
        else {
            return Ok(());
        };

        debug!("menu item {item} selected");

        match item {
            1 => table.print(),
            2 => insert(table.as_mut(), &mut input)?,
            3 => {
                if let Some(key) = read_key(&mut input)? {
                    if table.remove(&key) {
                        println!("Removed!");
                    } else {
                        println!("No value with this key");
                    }
                }
            }
            4 => {
                if let Some(key) = read_key(&mut input)? {
                    if table.find(&key) {
                        println!("Find!");
                    } else {
                        println!("No value with this key");
                    }
                }
            }
            5 => {
                if let Some(key) = read_key(&mut input)? {
                    match table.get(&key) {
                        Ok(value) => println!("Value: {value}"),
                        Err(err) => println!("{err}"),
                    }
                }
            }
            6 => {
                table.clear();
                println!("Cleared!");
            }
            7 => println!("Size: {}", table.len()),
            _ => break,
        }
    }

    Ok(())
}
