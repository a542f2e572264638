use scrollbox_common::*;

mod parser;
pub use parser::{ParseError, Parser};

mod markup;


pub fn parse<A>(markup: A) -> Result<NavigationTree, ParseError>
where
    A: AsRef<str>,
{
    let mut parser = Parser::new();
    parser.parse(markup)
}
