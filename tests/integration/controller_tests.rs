/*!
 * App controller run tests
 */

use anyhow::Result;
use tokio_test;

use doctrans::app_config::Config;
use doctrans::app_controller::Controller;

use crate::common;

/// Test that the controller rejects an invalid configuration up front
#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.pipeline.max_workers = 0;
    assert!(Controller::with_config(config).is_err());
}

/// Test that a missing input path fails before any provider is contacted
#[test]
fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let result = tokio_test::block_on(async {
        controller.run("does_not_exist.md".into(), None, false).await
    });
    assert!(result.is_err());
    Ok(())
}

/// Test that a directory without translatable files fails
#[test]
fn test_run_withEmptyDirectory_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;
    let result = tokio_test::block_on(async {
        controller.run(temp_dir.path().to_path_buf(), None, false).await
    });
    assert!(result.is_err());
    Ok(())
}

/// Test that an existing output is skipped without touching the provider
#[tokio::test]
async fn test_run_withExistingOutput_shouldSkipFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir, "one.md", "First document.\n")?;
    // Pre-existing translation
    common::create_test_file(&dir, "one.fr.md", "already translated\n")?;

    let controller = Controller::new_for_test()?;
    let summary = controller.run(input, None, false).await?;

    assert!(summary.is_success());
    assert_eq!(summary.translated.len(), 0);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(
        std::fs::read_to_string(dir.join("one.fr.md"))?,
        "already translated\n"
    );
    Ok(())
}
