use fqstream::{FastqPairReader, QualityEncoding};
use std::env::args;
use std::path::Path;

fn main() -> fqstream::Result<()>
{
    env_logger::init();
    let files: Vec<String> = args().skip(1).collect();
    let mut reader = match files.as_slice()
    {
        [interleaved] =>
        {
            FastqPairReader::interleaved_from_path(Path::new(interleaved), true, QualityEncoding::Phred33)?
        }
        [left, right] =>
        {
            FastqPairReader::from_paths(Path::new(left), Path::new(right), true, QualityEncoding::Phred33)?
        }
        _ =>
        {
            eprintln!("usage: pair_count INTERLEAVED | pair_count LEFT RIGHT");
            return Ok(());
        }
    };

    let mut pairs = 0usize;
    while let Some(_pair) = reader.next_pair()?
    {
        pairs += 1;
    }
    println!("{}", pairs);
    Ok(())
}
