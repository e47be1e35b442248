use std::path::{Path, PathBuf};

use getset::Getters;

use crate::{RedviewError, RedviewResult};

use super::{
    layout::{self, SolContents, SolDir},
    paths,
    CameraMeta, PageOptions, Photo, PhotoPage, RoverMeta,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Answers photo catalog queries by walking a media directory laid out as
/// `{media_root}/{rover}/{camera}/{sol}/{image}`.
///
/// The scanner holds nothing but its media root. Every query lists and stats the tree afresh, so
/// two identical queries can disagree if files change in between.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub with_prefix")]
pub struct CatalogScanner {
    /// Absolute path of the media root.
    media_root: PathBuf,
}

/// Accumulates photo records for a single query, numbering them as they are added.
struct PhotoCollector<'a> {
    media_root: &'a Path,
    rover: &'a str,
    next_id: u64,
    photos: Vec<Photo>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl CatalogScanner {
    /// Creates a scanner rooted at `media_root`.
    ///
    /// A relative root is made absolute against the current directory. Symlinks are not resolved.
    pub fn new(media_root: impl AsRef<Path>) -> RedviewResult<Self> {
        let media_root = std::path::absolute(media_root.as_ref())?;
        Ok(Self { media_root })
    }

    /// Returns every photo taken at the rover's latest sol, across all cameras.
    ///
    /// The latest sol is the largest latest-sol-with-data of any camera. Every camera that has
    /// images at exactly that sol contributes them; cameras whose newest data is older contribute
    /// nothing.
    pub async fn latest_by_rover(&self, rover: &str) -> RedviewResult<Vec<Photo>> {
        let rover_dir = self.rover_dir(rover).await?;
        let cameras = self.camera_sols(&rover_dir).await?;

        let mut latest = None;
        for (_, sols) in &cameras {
            let camera_latest = layout::latest_with_data(sols).await;
            latest = latest.max(camera_latest);
        }

        let Some(latest) = latest else {
            tracing::debug!("rover {} has no images", rover);
            return Ok(Vec::new());
        };

        let mut collector = PhotoCollector::new(&self.media_root, rover);
        for (camera, sols) in &cameras {
            for sol_dir in sols.iter().filter(|d| d.sol == latest) {
                collector.collect_sol_dir(&sol_dir.path, camera, latest).await?;
            }
        }

        Ok(collector.finish())
    }

    /// Returns the photos of one camera at one sol.
    ///
    /// Both `camera` and `sol` are required, and the resolved directory must exist. The directory
    /// is `{rover}/{camera}/{sol}` with the sol in plain decimal, so a directory named `007` is not
    /// reachable as sol 7 here even though the latest and full-history queries report it as sol 7.
    pub async fn by_sol_and_camera(
        &self,
        rover: &str,
        camera: Option<&str>,
        sol: Option<u32>,
    ) -> RedviewResult<Vec<Photo>> {
        let camera = camera.ok_or(RedviewError::MissingParameter("camera"))?;
        let sol = sol.ok_or(RedviewError::MissingParameter("sol"))?;
        let rover = paths::validate_segment("rover", rover)?;
        let camera = paths::validate_segment("camera", camera)?;

        let dir = self
            .media_root
            .join(rover)
            .join(camera)
            .join(sol.to_string());
        layout::ensure_dir(&dir).await?;

        let mut collector = PhotoCollector::new(&self.media_root, rover);
        for file in layout::list_images(&dir).await? {
            collector.push(&file, camera, sol).await?;
        }

        Ok(collector.finish())
    }

    /// Returns the photos taken at `sol` by every camera of the rover.
    ///
    /// Each camera is looked up at `{camera}/{sol}` with the sol in plain decimal, so directories
    /// named with leading zeros (`007`) are not matched. Cameras without that sol are skipped.
    pub async fn by_sol(&self, rover: &str, sol: Option<u32>) -> RedviewResult<Vec<Photo>> {
        let sol = sol.ok_or(RedviewError::MissingParameter("sol"))?;
        let rover_dir = self.rover_dir(rover).await?;

        let mut collector = PhotoCollector::new(&self.media_root, rover);
        for camera in layout::list_dirs(&rover_dir).await? {
            let dir = rover_dir.join(&camera).join(sol.to_string());
            collector.collect_sol_dir(&dir, &camera, sol).await?;
        }

        Ok(collector.finish())
    }

    /// Returns a slice of the rover's full photo history.
    ///
    /// Photos are ordered by camera in listing order, then by sol newest first, then by file in
    /// listing order. There is no date ordering across cameras. `total` always counts the full
    /// history.
    pub async fn all_by_rover(&self, rover: &str, page: PageOptions) -> RedviewResult<PhotoPage> {
        let rover_dir = self.rover_dir(rover).await?;
        let cameras = self.camera_sols(&rover_dir).await?;

        let mut collector = PhotoCollector::new(&self.media_root, rover);
        for (camera, sols) in &cameras {
            for sol_dir in sols {
                collector.collect_sol_dir(&sol_dir.path, camera, sol_dir.sol).await?;
            }
        }

        Ok(page.apply(collector.finish()))
    }

    /// Returns the rover's latest sol with data, or `None` if no camera has any image.
    pub async fn latest_sol(&self, rover: &str) -> RedviewResult<Option<u32>> {
        let rover_dir = self.rover_dir(rover).await?;

        let mut latest = None;
        for camera in layout::list_dirs(&rover_dir).await? {
            match layout::latest_sol_dir(&rover_dir.join(&camera)).await {
                Ok(camera_latest) => latest = latest.max(camera_latest),
                Err(e) => tracing::warn!("skipping camera {}/{}: {}", rover, camera, e),
            }
        }

        Ok(latest)
    }

    /// Resolves a rover directory, failing if it doesn't exist.
    async fn rover_dir(&self, rover: &str) -> RedviewResult<PathBuf> {
        let rover = paths::validate_segment("rover", rover)?;
        let dir = self.media_root.join(rover);
        layout::ensure_dir(&dir).await?;
        Ok(dir)
    }

    /// Lists every camera of a rover together with its sol directories, newest first.
    async fn camera_sols(&self, rover_dir: &Path) -> RedviewResult<Vec<(String, Vec<SolDir>)>> {
        let mut cameras = Vec::new();
        for camera in layout::list_dirs(rover_dir).await? {
            let sols = match layout::list_sol_dirs(&rover_dir.join(&camera)).await {
                Ok(sols) => sols,
                Err(e) => {
                    tracing::warn!("skipping camera {}: {}", camera, e);
                    Vec::new()
                }
            };

            cameras.push((camera, sols));
        }

        Ok(cameras)
    }
}

impl<'a> PhotoCollector<'a> {
    fn new(media_root: &'a Path, rover: &'a str) -> Self {
        Self {
            media_root,
            rover,
            next_id: 1,
            photos: Vec::new(),
        }
    }

    /// Adds every image of a sol directory, if it has any.
    async fn collect_sol_dir(&mut self, dir: &Path, camera: &str, sol: u32) -> RedviewResult<()> {
        match layout::read_sol_dir(dir).await {
            SolContents::HasImages(files) => {
                for file in files {
                    self.push(&file, camera, sol).await?;
                }
            }
            SolContents::Empty => tracing::debug!("no images in {}", dir.display()),
            SolContents::Absent => tracing::debug!("no sol directory at {}", dir.display()),
        }

        Ok(())
    }

    async fn push(&mut self, file: &Path, camera: &str, sol: u32) -> RedviewResult<()> {
        let photo = Photo {
            id: self.next_id,
            sol,
            camera: CameraMeta::from_dir_name(camera),
            rover: RoverMeta {
                name: self.rover.to_string(),
            },
            img_src: paths::to_url(self.media_root, file)?,
            local_path: paths::normalize_separators(file),
            earth_date: layout::earth_date(file).await,
        };

        self.next_id += 1;
        self.photos.push(photo);
        Ok(())
    }

    fn finish(self) -> Vec<Photo> {
        self.photos
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use tempfile::tempdir;

    use super::*;

    #[test_log::test(tokio::test)]
    /// Tests the worked example from the catalog layout docs.
    ///
    /// ```text
    /// media/
    /// └── curiosity/
    ///     ├── MAST/
    ///     │   ├── 10/a.jpg
    ///     │   └── 12/b.jpg
    ///     └── NAVCAM/
    ///         └── 11/c.jpg
    /// ```
    async fn test_scanner_worked_example() -> anyhow::Result<()> {
        let temp = tempdir()?;
        helper::create_files(
            temp.path(),
            &[
                "curiosity/MAST/10/a.jpg",
                "curiosity/MAST/12/b.jpg",
                "curiosity/NAVCAM/11/c.jpg",
            ],
        )
        .await?;
        let scanner = CatalogScanner::new(temp.path())?;

        assert_eq!(scanner.latest_sol("curiosity").await?, Some(12));

        let latest = scanner.latest_by_rover("curiosity").await?;
        assert_eq!(
            helper::summary(&latest),
            vec![(12, "MAST".to_string(), "b.jpg".to_string())]
        );
        assert_eq!(latest[0].id, 1);

        let by_sol = scanner.by_sol("curiosity", Some(11)).await?;
        assert_eq!(
            helper::summary(&by_sol),
            vec![(11, "NAVCAM".to_string(), "c.jpg".to_string())]
        );

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_scanner_latest_aggregates_every_camera_at_max_sol() -> anyhow::Result<()> {
        let temp = tempdir()?;
        helper::create_files(
            temp.path(),
            &[
                "perseverance/MAST/20/a.jpg",
                "perseverance/MAST/20/b.png",
                "perseverance/NAVCAM/20/c.jpg",
                "perseverance/NAVCAM/19/d.jpg",
                "perseverance/HAZCAM/18/e.jpg",
                "perseverance/HAZCAM/21/notes.txt",
            ],
        )
        .await?;
        let scanner = CatalogScanner::new(temp.path())?;

        let latest = scanner.latest_by_rover("perseverance").await?;
        let mut summary = helper::summary(&latest);
        summary.sort();
        assert_eq!(
            summary,
            vec![
                (20, "MAST".to_string(), "a.jpg".to_string()),
                (20, "MAST".to_string(), "b.png".to_string()),
                (20, "NAVCAM".to_string(), "c.jpg".to_string()),
            ]
        );

        let ids: HashSet<u64> = latest.iter().map(|p| p.id).collect();
        assert_eq!(ids, HashSet::from([1, 2, 3]));
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_scanner_latest_includes_camera_with_max_sol_behind_empty_newer_dir(
    ) -> anyhow::Result<()> {
        let temp = tempdir()?;
        helper::create_files(
            temp.path(),
            &[
                "curiosity/MAST/12/a.jpg",
                "curiosity/NAVCAM/12/b.jpg",
                "curiosity/NAVCAM/15/notes.txt",
            ],
        )
        .await?;
        let scanner = CatalogScanner::new(temp.path())?;

        assert_eq!(scanner.latest_sol("curiosity").await?, Some(12));
        assert_eq!(scanner.latest_by_rover("curiosity").await?.len(), 2);
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_scanner_rover_without_images() -> anyhow::Result<()> {
        let temp = tempdir()?;
        helper::create_files(temp.path(), &["curiosity/MAST/draft/a.jpg"]).await?;
        tokio::fs::create_dir_all(temp.path().join("spirit")).await?;
        let scanner = CatalogScanner::new(temp.path())?;

        assert!(scanner.latest_by_rover("curiosity").await?.is_empty());
        assert_eq!(scanner.latest_sol("curiosity").await?, None);
        assert!(scanner.latest_by_rover("spirit").await?.is_empty());
        assert_eq!(scanner.latest_sol("spirit").await?, None);

        let page = scanner.all_by_rover("curiosity", PageOptions::default()).await?;
        assert_eq!(page.total, 0);
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_scanner_sol_zero_counts_as_data() -> anyhow::Result<()> {
        let temp = tempdir()?;
        helper::create_files(temp.path(), &["curiosity/MAST/0/a.jpg"]).await?;
        let scanner = CatalogScanner::new(temp.path())?;

        assert_eq!(scanner.latest_sol("curiosity").await?, Some(0));
        assert_eq!(scanner.latest_by_rover("curiosity").await?.len(), 1);
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_scanner_unknown_rover_fails_everywhere() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let scanner = CatalogScanner::new(temp.path())?;

        assert!(matches!(
            scanner.latest_by_rover("opportunity").await,
            Err(RedviewError::NotFound(_))
        ));
        assert!(matches!(
            scanner
                .by_sol_and_camera("opportunity", Some("MAST"), Some(1))
                .await,
            Err(RedviewError::NotFound(_))
        ));
        assert!(matches!(
            scanner.all_by_rover("opportunity", PageOptions::default()).await,
            Err(RedviewError::NotFound(_))
        ));
        assert!(matches!(
            scanner.by_sol("opportunity", Some(1)).await,
            Err(RedviewError::NotFound(_))
        ));
        assert!(matches!(
            scanner.latest_sol("opportunity").await,
            Err(RedviewError::NotFound(_))
        ));
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_scanner_missing_parameters() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let scanner = CatalogScanner::new(temp.path())?;

        // The rover doesn't exist either, so these only pass if the parameters are checked first.
        assert!(matches!(
            scanner.by_sol_and_camera("nowhere", None, Some(1)).await,
            Err(RedviewError::MissingParameter("camera"))
        ));
        assert!(matches!(
            scanner.by_sol_and_camera("nowhere", Some("MAST"), None).await,
            Err(RedviewError::MissingParameter("sol"))
        ));
        assert!(matches!(
            scanner.by_sol("nowhere", None).await,
            Err(RedviewError::MissingParameter("sol"))
        ));
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_scanner_by_sol_and_camera() -> anyhow::Result<()> {
        let temp = tempdir()?;
        helper::create_files(
            temp.path(),
            &[
                "curiosity/MAST/7/a.jpg",
                "curiosity/MAST/7/b.JPG",
                "curiosity/MAST/7/notes.txt",
            ],
        )
        .await?;
        let scanner = CatalogScanner::new(temp.path())?;

        let photos = scanner
            .by_sol_and_camera("curiosity", Some("MAST"), Some(7))
            .await?;
        assert_eq!(photos.len(), 2);
        let mut ids: Vec<u64> = photos.iter().map(|p| p.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2]);

        let photo = &photos[0];
        assert_eq!(photo.sol, 7);
        assert_eq!(photo.camera, CameraMeta::from_dir_name("MAST"));
        assert_eq!(photo.rover.name, "curiosity");
        assert!(photo.img_src.starts_with("/files/curiosity/MAST/7/"));
        assert!(photo.local_path.starts_with(&paths::normalize_separators(
            scanner.get_media_root()
        )));
        assert!(photo.earth_date.is_some());

        assert!(matches!(
            scanner
                .by_sol_and_camera("curiosity", Some("MAST"), Some(8))
                .await,
            Err(RedviewError::NotFound(_))
        ));
        assert!(matches!(
            scanner
                .by_sol_and_camera("curiosity", Some("../curiosity"), Some(7))
                .await,
            Err(RedviewError::InvalidParameter { name: "camera", .. })
        ));
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_scanner_by_sol_skips_cameras_without_sol() -> anyhow::Result<()> {
        let temp = tempdir()?;
        helper::create_files(
            temp.path(),
            &[
                "curiosity/MAST/11/a.jpg",
                "curiosity/MAST/11/notes.txt",
                "curiosity/NAVCAM/11/b.jpg",
                "curiosity/NAVCAM/11/raw.dng",
                "curiosity/HAZCAM/10/c.jpg",
            ],
        )
        .await?;
        let scanner = CatalogScanner::new(temp.path())?;

        let mut summary = helper::summary(&scanner.by_sol("curiosity", Some(11)).await?);
        summary.sort();
        assert_eq!(
            summary,
            vec![
                (11, "MAST".to_string(), "a.jpg".to_string()),
                (11, "NAVCAM".to_string(), "b.jpg".to_string()),
            ]
        );
        assert!(scanner.by_sol("curiosity", Some(99)).await?.is_empty());
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_scanner_by_sol_matches_decimal_dir_name_only() -> anyhow::Result<()> {
        let temp = tempdir()?;
        helper::create_files(temp.path(), &["curiosity/MAST/007/a.jpg"]).await?;
        let scanner = CatalogScanner::new(temp.path())?;

        let page = scanner.all_by_rover("curiosity", PageOptions::default()).await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.photos[0].sol, 7);

        assert!(scanner.by_sol("curiosity", Some(7)).await?.is_empty());
        assert!(matches!(
            scanner.by_sol_and_camera("curiosity", Some("MAST"), Some(7)).await,
            Err(RedviewError::NotFound(_))
        ));
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_scanner_record_without_stat_has_null_earth_date() -> anyhow::Result<()> {
        let temp = tempdir()?;
        helper::create_files(temp.path(), &["curiosity/MAST/3/a.jpg"]).await?;
        let scanner = CatalogScanner::new(temp.path())?;
        let dir = scanner.get_media_root().join("curiosity/MAST/3");

        let mut collector = PhotoCollector::new(scanner.get_media_root(), "curiosity");
        collector.push(&dir.join("a.jpg"), "MAST", 3).await?;
        // Deleted between listing and stat.
        collector.push(&dir.join("gone.jpg"), "MAST", 3).await?;
        let photos = collector.finish();

        assert_eq!(photos.len(), 2);
        assert!(photos[0].earth_date.is_some());
        assert_eq!(photos[1].id, 2);
        assert_eq!(photos[1].earth_date, None);
        assert_eq!(photos[1].img_src, "/files/curiosity/MAST/3/gone.jpg");
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_scanner_all_by_rover_order_and_pagination() -> anyhow::Result<()> {
        let temp = tempdir()?;
        helper::create_files(
            temp.path(),
            &[
                "curiosity/MAST/1/a.jpg",
                "curiosity/MAST/3/b.jpg",
                "curiosity/MAST/3/c.jpg",
                "curiosity/MAST/draft/x.jpg",
                "curiosity/MAST/2/notes.txt",
                "curiosity/NAVCAM/2/d.jpg",
                "curiosity/NAVCAM/5/e.jpg",
            ],
        )
        .await?;
        let scanner = CatalogScanner::new(temp.path())?;

        let full = scanner.all_by_rover("curiosity", PageOptions::default()).await?;
        assert_eq!(full.total, 5);
        assert_eq!(full.photos.len(), 5);
        assert_eq!(
            full.photos.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );

        // Within each camera, sols run newest first.
        for camera in ["MAST", "NAVCAM"] {
            let sols: Vec<u32> = full
                .photos
                .iter()
                .filter(|p| p.camera.name == camera)
                .map(|p| p.sol)
                .collect();
            let mut sorted = sols.clone();
            sorted.sort_by(|a, b| b.cmp(a));
            assert_eq!(sols, sorted);
        }

        // Cameras are contiguous.
        let cameras: Vec<&str> = full.photos.iter().map(|p| p.camera.name.as_str()).collect();
        let switches = cameras.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(switches, 1);

        // Idempotent against an unchanged tree.
        let again = scanner.all_by_rover("curiosity", PageOptions::default()).await?;
        assert_eq!(again, full);

        for (limit, offset) in [(2, 0), (2, 3), (10, 4), (1, 5), (0, 0)] {
            let page = scanner
                .all_by_rover("curiosity", PageOptions::new(Some(limit), offset))
                .await?;
            assert_eq!(page.total, 5);
            let end = (offset + limit).min(full.photos.len());
            let start = offset.min(end);
            assert_eq!(page.photos, full.photos[start..end].to_vec());
        }

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_scanner_relative_root_is_made_absolute() -> anyhow::Result<()> {
        let scanner = CatalogScanner::new("media")?;
        assert!(scanner.get_media_root().is_absolute());
        assert!(scanner.get_media_root().ends_with("media"));
        Ok(())
    }

    mod helper {
        use super::*;

        /// Creates each file, and its parent directories, under `root`.
        pub(super) async fn create_files(root: &Path, files: &[&str]) -> anyhow::Result<()> {
            for file in files {
                let path = root.join(file);
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&path, b"img").await?;
            }
            Ok(())
        }

        /// Reduces photos to `(sol, camera, file name)` triples.
        pub(super) fn summary(photos: &[Photo]) -> Vec<(u32, String, String)> {
            photos
                .iter()
                .map(|p| {
                    let file = p.local_path.rsplit('/').next().unwrap_or_default();
                    (p.sol, p.camera.name.clone(), file.to_string())
                })
                .collect()
        }
    }
}
