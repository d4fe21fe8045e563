use fqstream::FastqReader;
use std::env::args;
use std::path::Path;

fn main() -> fqstream::Result<()>
{
    env_logger::init();
    for filename in args().skip(1)
    {
        let mut reader = FastqReader::from_path(Path::new(&filename))?;
        while let Some(record) = reader.next_record()?
        {
            println!("{}", record);
        }
    }
    Ok(())
}
