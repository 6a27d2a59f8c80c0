use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("rpcwire {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: rpcwire");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("build_target: {}", option_env!("RPCWIRE_BUILD_TARGET").unwrap_or("unknown"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!(
        "features: protocol={}, async={}, cli=true",
        cfg!(feature = "protocol"),
        cfg!(feature = "async")
    );
    println!(
        "defaults: read_chunk_size={}, buffer_capacity={}",
        rpcwire_frame::DEFAULT_READ_CHUNK_SIZE,
        rpcwire_frame::DEFAULT_BUFFER_CAPACITY
    );

    Ok(SUCCESS)
}
