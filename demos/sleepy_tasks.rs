//! Demonstration program: submit a few sleeping tasks and print their results.

use std::thread;
use std::time::Duration;
use taskpool::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let pool = ThreadPool::with_threads(4)?;

    let handles: Vec<_> = (0..4u64)
        .map(|i| {
            pool.submit(move || {
                thread::sleep(Duration::from_secs(i));
                i
            })
        })
        .collect::<Result<_>>()?;

    for handle in handles {
        println!("func {} return", handle.join()?);
    }

    pool.shutdown()?;
    Ok(())
}
