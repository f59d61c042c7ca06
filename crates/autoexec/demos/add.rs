//! add: a single function as a whole program.
//!
//! `add --a=1 --b=2` prints `15.0`.

mod arithmetic;

use anyhow::Result;

fn main() -> Result<()> {
    arithmetic::init_tracing();

    let result = autoexec::execute_function(&arithmetic::add())?;
    println!("{}", autoexec::display_value(&result));
    Ok(())
}
