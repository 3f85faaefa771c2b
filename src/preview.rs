use crate::manifest::Manifest;
use colored::Colorize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write;
use std::path::Path;
use std::rc::Rc;

/// Represents a node in the tree (either file or directory).
#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<Rc<RefCell<TreeNode>>>,
    is_file: bool,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
        }
    }
}

/// Build the directory tree from the manifest entries, returning the root node.
///
/// Directories only exist implicitly in manifest paths, so every directory
/// segment gets a node the first time it is seen.
fn build_tree(manifest: &Manifest, destination: &Path) -> Rc<RefCell<TreeNode>> {
    // create a root node to represent the 'destination' directory
    let root_name = destination
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| destination.display().to_string());

    let root = Rc::new(RefCell::new(TreeNode::new(root_name, false)));

    // map relative directory path to node
    let mut lookup: HashMap<String, Rc<RefCell<TreeNode>>> = HashMap::new();

    for entry in manifest {
        let segments: Vec<&str> = entry.path.segments().collect();

        let Some((file_name, directories)) = segments.split_last() else {
            continue;
        };

        let mut parent = Rc::clone(&root);
        let mut parent_key = String::new();

        for directory in directories {
            let key = if parent_key.is_empty() {
                directory.to_string()
            } else {
                format!("{parent_key}/{directory}")
            };

            let node = match lookup.get(&key) {
                Some(node) => Rc::clone(node),
                None => {
                    let node = Rc::new(RefCell::new(TreeNode::new(directory.to_string(), false)));

                    parent.borrow_mut().children.push(Rc::clone(&node));

                    lookup.insert(key.clone(), Rc::clone(&node));

                    node
                }
            };

            parent = node;
            parent_key = key;
        }

        let file = Rc::new(RefCell::new(TreeNode::new(file_name.to_string(), true)));

        parent.borrow_mut().children.push(file);
    }

    root
}

/// Write the tree with a nice ASCII style.
fn write_tree(out: &mut String, node: &Rc<RefCell<TreeNode>>, prefix: &str, is_last: bool) {
    let node_borrow = node.borrow();

    let connector = if is_last {
        "└── ".yellow()
    } else {
        "├── ".yellow()
    };
    let name = if node_borrow.is_file {
        node_borrow.name.green()
    } else {
        node_borrow.name.blue()
    };
    let _ = writeln!(out, "{}{}{}", prefix.yellow(), connector, name);

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let len = node_borrow.children.len();
    for (i, child) in node_borrow.children.iter().enumerate() {
        let last = i == len - 1;
        write_tree(out, child, &child_prefix, last);
    }
}

/// Renders `manifest` as an ASCII tree rooted at `destination`.
pub fn render_tree(manifest: &Manifest, destination: &Path) -> String {
    let tree_root = build_tree(manifest, destination);

    let mut out = String::new();

    write_tree(&mut out, &tree_root, "", true);

    out
}

pub fn preview_as_tree(manifest: &Manifest, destination: &Path) {
    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    let fancy_prompt = format!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue(),
    );

    println!("{}", fancy_prompt);

    print!("{}", render_tree(manifest, destination));

    let fancy_prompt = format!(
        "\n{} {}",
        "└─".bold().bright_blue(),
        format!("{} files under {}", manifest.len(), destination.display()).bright_green()
    );

    println!("{}", fancy_prompt);
}
