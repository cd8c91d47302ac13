//! Small constructors for building Scripts/Blocks by hand, used by
//! integration tests and the REPL demo. Not a parser: callers already
//! know the command and shape they want.

use crate::block::{Arg, Block, BlockType, Command, Script};
use crate::value::Value;

/// Build a stack/reporter/boolean block from a command and its
/// arguments, using that command's canonical `Insert` descriptors
/// (`BlockType::for_command`) the same way a loader would construct
/// one from a parsed project file.
pub fn block(command: Command, args: Vec<Arg>) -> Block {
    let block_type = BlockType::for_command(command);
    debug_assert_eq!(
        block_type.inserts.len(),
        args.len(),
        "{:?} takes {} argument(s), got {}",
        command,
        block_type.inserts.len(),
        args.len()
    );
    Block::new(block_type, args)
}

pub fn hat(command: Command, args: Vec<Arg>) -> Block {
    block(command, args)
}

pub fn num(n: f64) -> Arg {
    Arg::number(n)
}

pub fn text(s: impl Into<String>) -> Arg {
    Arg::text(s)
}

pub fn expr(b: Block) -> Arg {
    Arg::Expr(Box::new(b))
}

pub fn body(blocks: Vec<Block>) -> Arg {
    Arg::Body(blocks)
}

pub fn value(v: Value) -> Arg {
    Arg::Value(v)
}

/// Build a script from a hat block (or bare stack block, for scripts
/// started directly from the REPL) followed by its stack.
pub fn script(blocks: Vec<Block>) -> Script {
    Script::new(blocks)
}
