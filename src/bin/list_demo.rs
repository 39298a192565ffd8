//! Builds a list of integers and a list of strings, and prints them as they
//! are mutated.
//!
//! Set `RUST_LOG=debug` to see what the list does underneath.

use circular_list::{List, Result};
use env_logger::Env;
use log::info;
use std::fmt::{Debug, Display};

fn print_list<T: Display>(list: &List<T>) {
    let elements: Vec<String> = list.iter().map(ToString::to_string).collect();
    println!("{}", elements.join(" "));
}

/// Integers show bare, strings show quoted.
fn push_front_label<T: Debug>(extra: &T) -> String {
    format!("After push_front({:?}): ", extra)
}

fn demo<T: Debug + Display>(kind: &str, items: [T; 3], extra: T) -> Result<()> {
    let mut list = List::new();
    info!("filling the {} list", kind);
    for item in items {
        list.push_back(item);
    }

    println!("{} list size: {}", kind, list.len());
    println!("Front: {}, Back: {}", list.front()?, list.back()?);
    print!("Elements: ");
    print_list(&list);

    let label = push_front_label(&extra);
    list.push_front(extra);
    print!("{}", label);
    print_list(&list);

    list.pop_front()?;
    print!("After pop_front(): ");
    print_list(&list);

    list.clear();
    info!("cleared the {} list", kind);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    demo("Integer", [5, 10, 20], 7)?;
    demo(
        "String",
        ["cherry".to_string(), "apple".to_string(), "banana".to_string()],
        "date".to_string(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_front_labels() {
        assert_eq!(push_front_label(&7), "After push_front(7): ");
        assert_eq!(
            push_front_label(&"date".to_string()),
            "After push_front(\"date\"): "
        );
    }
}
