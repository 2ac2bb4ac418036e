macro_rules! require_program {
    ($name:expr) => {{
        let exists = ::std::process::Command::new($name)
            .arg("--help")
            .stdout(::std::process::Stdio::null())
            .stderr(::std::process::Stdio::null())
            .status()
            .is_ok();
        if !exists {
            eprintln!("Couldn't find \"{}\"", $name);
            return;
        }
    }};
}

/// Create an empty git repository to clone from.
pub fn init_repo(dir: &::std::path::Path) {
    let status = ::std::process::Command::new("git")
        .arg("init")
        .arg("--quiet")
        .arg(dir)
        .status()
        .unwrap();
    assert!(status.success());
}
