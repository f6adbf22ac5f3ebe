//! Tests for command-line parsing and file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use markov_image::MarkovError;
    use markov_image::io::cli::{Cli, FileProcessor};
    use markov_image::io::configuration::{DEFAULT_LOG_LEVEL, DEFAULT_THRESHOLD};
    use markov_image::synthesis::FrontierOrder;
    use std::collections::HashSet;
    use std::fs;
    use std::path::{Path, PathBuf};

    fn write_source(path: &Path) -> RgbaImage {
        let image = RgbaImage::from_fn(6, 4, |x, y| {
            Rgba([(x * 40) as u8, (y * 60) as u8, ((x + y) % 2 * 200) as u8, 255])
        });
        image.save(path).expect("save source");
        image
    }

    fn quiet_cli(args: &[&str]) -> Cli {
        let mut full = vec!["program", "--quiet"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    // Only the target is required
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "test.png"]);

        assert_eq!(cli.target, PathBuf::from("test.png"));
        assert_eq!(cli.output, None);
        assert_eq!(cli.threshold, DEFAULT_THRESHOLD);
        assert_eq!(cli.frontier, FrontierOrder::Random);
        assert_eq!(cli.log_level, DEFAULT_LOG_LEVEL);
        assert!(!cli.quiet);
        assert!(!cli.require_full_coverage);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Every option parses
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "input.png",
            "--output",
            "out/result.png",
            "--threshold",
            "4",
            "--frontier",
            "lifo",
            "--quiet",
            "--no-skip",
            "--require-full-coverage",
            "--log-level",
            "debug",
        ]);

        assert_eq!(cli.output, Some(PathBuf::from("out/result.png")));
        assert_eq!(cli.threshold, 4);
        assert_eq!(cli.frontier, FrontierOrder::Lifo);
        assert!(cli.quiet);
        assert!(!cli.skip_existing());
        assert!(cli.require_full_coverage);
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.quantization().map(|t| t.get()).ok(), Some(4));
    }

    // Unknown frontier orders are rejected by the parser
    #[test]
    fn test_cli_rejects_unknown_frontier() {
        assert!(Cli::try_parse_from(["program", "a.png", "--frontier", "fifo"]).is_err());
    }

    // Zero threshold parses but fails validation
    #[test]
    fn test_zero_threshold_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("source.png");
        write_source(&input);

        let cli = quiet_cli(&[input.to_str().expect("utf-8 path"), "-t", "0"]);
        assert!(cli.quantization().is_err());
        let result = FileProcessor::new(cli).process();
        assert!(matches!(
            result,
            Err(MarkovError::InvalidParameter {
                parameter: "threshold",
                ..
            })
        ));
    }

    // Default output sits next to the input with the suffix
    #[test]
    fn test_output_path_naming() {
        assert_eq!(
            FileProcessor::get_output_path(Path::new("dir/cat.png")),
            PathBuf::from("dir/cat_markov.png")
        );
        assert_eq!(
            FileProcessor::get_output_path(Path::new("cat.png")),
            PathBuf::from("cat_markov.png")
        );
    }

    // A single file produces a same-sized image from the source palette
    #[test]
    fn test_process_single_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("source.png");
        let source = write_source(&input);

        let cli = quiet_cli(&[input.to_str().expect("utf-8 path"), "--require-full-coverage"]);
        FileProcessor::new(cli).process().expect("process");

        let output = image::open(dir.path().join("source_markov.png"))
            .expect("output exists")
            .to_rgba8();
        assert_eq!(output.dimensions(), source.dimensions());

        let palette: HashSet<[u8; 4]> = source.pixels().map(|p| p.0).collect();
        assert!(output.pixels().all(|p| palette.contains(&p.0)));
    }

    // Explicit output paths are honored
    #[test]
    fn test_process_explicit_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("source.png");
        write_source(&input);
        let output = dir.path().join("elsewhere/generated.png");

        let cli = quiet_cli(&[
            input.to_str().expect("utf-8 path"),
            "-o",
            output.to_str().expect("utf-8 path"),
        ]);
        FileProcessor::new(cli).process().expect("process");

        assert!(output.exists());
        assert!(!dir.path().join("source_markov.png").exists());
    }

    // Directories are processed file by file, skipping generated outputs
    #[test]
    fn test_process_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_source(&dir.path().join("a.png"));
        write_source(&dir.path().join("b.png"));
        fs::write(dir.path().join("notes.txt"), "not an image").expect("write");

        let cli = quiet_cli(&[dir.path().to_str().expect("utf-8 path")]);
        FileProcessor::new(cli).process().expect("first pass");
        assert!(dir.path().join("a_markov.png").exists());
        assert!(dir.path().join("b_markov.png").exists());

        let cli = quiet_cli(&["--no-skip", dir.path().to_str().expect("utf-8 path")]);
        FileProcessor::new(cli).process().expect("second pass");
        assert!(!dir.path().join("a_markov_markov.png").exists());
    }

    // Existing outputs are left alone unless --no-skip is given
    #[test]
    fn test_skip_existing_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("source.png");
        write_source(&input);
        let output = dir.path().join("source_markov.png");
        fs::write(&output, b"placeholder").expect("write placeholder");

        let cli = quiet_cli(&[input.to_str().expect("utf-8 path")]);
        FileProcessor::new(cli).process().expect("process");
        assert_eq!(fs::read(&output).expect("read"), b"placeholder");

        let cli = quiet_cli(&["--no-skip", input.to_str().expect("utf-8 path")]);
        FileProcessor::new(cli).process().expect("process");
        assert!(image::open(&output).is_ok());
    }

    // Directory listing keeps PNG inputs only, sorted, without earlier outputs
    #[test]
    fn test_list_inputs() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_source(&dir.path().join("b.png"));
        write_source(&dir.path().join("a.PNG"));
        write_source(&dir.path().join("a_markov.png"));
        fs::write(dir.path().join("notes.txt"), "text").expect("write");

        let inputs = FileProcessor::list_inputs(dir.path()).expect("list");
        assert_eq!(
            inputs,
            vec![dir.path().join("a.PNG"), dir.path().join("b.png")]
        );
    }

    // Listing failures name the directory that could not be read
    #[test]
    fn test_list_inputs_error_names_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("gone");

        let error = FileProcessor::list_inputs(&missing).expect_err("missing directory");
        assert!(error.to_string().contains("gone"));
        assert!(matches!(
            &error,
            MarkovError::FileSystem { path, operation: "read directory", .. } if path == &missing
        ));
    }

    // --output cannot be combined with a directory target
    #[test]
    fn test_output_with_directory_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cli = quiet_cli(&[dir.path().to_str().expect("utf-8 path"), "-o", "x.png"]);
        assert!(FileProcessor::new(cli).process().is_err());
    }

    // Non-PNG and missing targets are rejected
    #[test]
    fn test_invalid_targets() {
        let dir = tempfile::tempdir().expect("tempdir");
        let text = dir.path().join("notes.txt");
        fs::write(&text, "hello").expect("write");

        let cli = quiet_cli(&[text.to_str().expect("utf-8 path")]);
        assert!(FileProcessor::new(cli).process().is_err());

        let missing = dir.path().join("missing.png");
        let cli = quiet_cli(&[missing.to_str().expect("utf-8 path")]);
        assert!(FileProcessor::new(cli).process().is_err());
    }

    // Progress display does not change the result
    #[test]
    fn test_process_with_progress() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("source.png");
        write_source(&input);

        let cli = Cli::parse_from(["program", input.to_str().expect("utf-8 path"), "-f", "lifo"]);
        FileProcessor::new(cli).process().expect("process");
        assert!(dir.path().join("source_markov.png").exists());
    }
}
