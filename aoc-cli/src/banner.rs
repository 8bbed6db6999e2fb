//! The tree banner and the all-green celebration

use console::style;

const TREE: [&str; 8] = [
    "         *",
    "        /.\\",
    "       /o..\\",
    "       /..o\\",
    "      /.o..o\\",
    "      /...o.\\",
    "     /..o....\\",
    "     ^^^[_]^^^",
];

pub fn tree() -> String {
    TREE.iter()
        .enumerate()
        .map(|(row, line)| match row {
            0 => style(line).yellow().bold().to_string(),
            7 => style(line).red().to_string(),
            _ => style(line).green().to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_tree() {
    println!("{}", tree());
}

/// Shown after every solution of a "run all" succeeded
pub fn print_celebration() {
    print_tree();
    println!("{}", style("All solutions passed, Merry Christmas!").green().bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_has_every_row() {
        let tree = console::strip_ansi_codes(&tree()).to_string();
        assert_eq!(tree.lines().count(), TREE.len());
        assert!(tree.contains("[_]"));
    }
}
