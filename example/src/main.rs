use dry_mustache::{Token, parse};

mod templates {
    dry_mustache::directory!("templates/");
    pub const BUTTON2: &str = dry_mustache::file!("template/button2.mustache");
    //language=html
    pub const HELLO_FIRST_LAST: &str = dry_mustache::str!(r#"
        <p>Hello {{firstname}} {{lastname}}</p>
    "#);
}

fn print_tree(tokens: &[Token], depth: usize) {
    for token in tokens {
        println!(
            "{:indent$}{} {:?} [{}..{}]",
            "",
            token.tag_type(),
            token.value,
            token.start,
            token.end,
            indent = depth * 2
        );
        print_tree(&token.children, depth + 1);
    }
}

fn main() {
    for (name, src) in [
        ("button", templates::BUTTON),
        ("todo-list", templates::TODO_LIST),
        ("button2", templates::BUTTON2),
        ("hello_first_last", templates::HELLO_FIRST_LAST),
    ] {
        println!("{}:", name);
        match parse(src) {
            Ok(tree) => print_tree(&tree, 1),
            Err(err) => println!("  error: {}", err),
        }
    }
}
