use fqstream::FastqReader;
use std::env::args;
use std::path::Path;

fn main() -> fqstream::Result<()>
{
    env_logger::init();
    for filename in args().skip(1)
    {
        let mut reader = FastqReader::from_path(Path::new(&filename))?;
        let mut records = 0usize;
        let mut bases = 0usize;
        while let Some(record) = reader.next_record()?
        {
            records += 1;
            bases += record.len();
        }
        println!("{}\t{}\t{}", filename, records, bases);
    }
    Ok(())
}
