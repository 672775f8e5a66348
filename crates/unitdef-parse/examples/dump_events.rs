use std::io::Read;
use unitdef_parse::Parser;

fn main() -> std::io::Result<()> {
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;

    println!("=== Events ===");
    for event in Parser::new(&source).parse_to_vec() {
        println!("{:?}", event);
    }
    Ok(())
}
