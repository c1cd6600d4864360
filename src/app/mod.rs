pub mod actions;
pub mod handlers;
pub mod navigation;
mod state;
mod update;

pub use state::*;
pub use update::update;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::models::objects::{parent_prefix, FileObject, S3Object};
use crate::models::status::StatusLog;
use crate::models::tree::{TreeModel, TreeNode};
use crate::operations::jobs::BackgroundJob;
use crate::operations::storage::ObjectStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Browser,
    Confirm,
    BucketSelect,
    Help,
}

/// Pane that receives cursor keys
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Local,
    Remote,
}

pub struct App {
    pub store: Arc<dyn ObjectStore>,
    pub screen: Screen,
    pub prev_screen: Option<Screen>,
    pub focus: Focus,
    pub should_quit: bool,
    pub dry_run: bool,
    pub app_title: String,

    pub local_tree: TreeModel<FileObject>,
    pub remote_tree: Option<TreeModel<S3Object>>,
    pub bucket: Option<String>,

    pub confirm: ConfirmState,
    pub bucket_select: BucketSelectState,
    pub status: StatusLog,

    pub jobs: Vec<BackgroundJob>,
}

impl App {
    /// Builds the app and lists the local root. The bucket is opened on `Message::Start`.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        root_dir: PathBuf,
        bucket: Option<String>,
        dry_run: bool,
    ) -> Self {
        let label = root_dir.display().to_string();
        let local_tree = TreeModel::new(TreeNode::branch(label, FileObject::folder(root_dir)));

        let mut app = Self {
            store,
            screen: Screen::Browser,
            prev_screen: None,
            focus: Focus::Local,
            should_quit: false,
            dry_run,
            app_title: if dry_run {
                "bucketman (dry run)".to_string()
            } else {
                "bucketman".to_string()
            },
            local_tree,
            remote_tree: None,
            bucket,
            confirm: ConfirmState::default(),
            bucket_select: BucketSelectState::default(),
            status: StatusLog::default(),
            jobs: Vec::new(),
        };

        navigation::load_local_node(&mut app, &[]);
        app
    }

    pub fn local_root(&self) -> &Path {
        &self.local_tree.root().data.path
    }

    pub fn selected_local_object(&self) -> &FileObject {
        &self.local_tree.cursor_node().data
    }

    /// The selected folder, or the folder containing the selected file.
    pub fn selected_local_folder(&self) -> PathBuf {
        let selected = self.selected_local_object();
        if selected.is_dir() {
            selected.path.clone()
        } else {
            selected
                .path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.local_root().to_path_buf())
        }
    }

    pub fn selected_remote_object(&self) -> Option<&S3Object> {
        self.remote_tree.as_ref().map(|tree| &tree.cursor_node().data)
    }

    /// The selected prefix, or the prefix containing the selected object.
    pub fn selected_remote_prefix(&self) -> Option<String> {
        self.selected_remote_object().map(|obj| {
            if obj.is_dir() {
                obj.key.clone()
            } else {
                parent_prefix(&obj.key)
            }
        })
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Local if self.remote_tree.is_some() => Focus::Remote,
            _ => Focus::Local,
        };
    }

    pub fn show_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            self.prev_screen = Some(self.screen.clone());
            self.screen = screen;
        }
    }

    pub fn go_back(&mut self) {
        if let Some(prev) = self.prev_screen.take() {
            self.screen = prev;
        } else {
            self.screen = Screen::Browser;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::operations::memory::MemoryStore;
    use std::fs;
    use tempfile::TempDir;

    /// Local tree over a temp dir holding `a.txt` and `sub/b.txt`.
    pub(crate) fn test_app(store: Arc<MemoryStore>) -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), b"hello").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.txt"), b"b").unwrap();

        let app = App::new(store, dir.path().to_path_buf(), Some("b".to_string()), false);
        (dir, app)
    }

    #[test]
    fn new_lists_the_local_root() {
        let (dir, app) = test_app(Arc::new(MemoryStore::new()));

        let labels: Vec<_> = app
            .local_tree
            .root()
            .children
            .iter()
            .map(|n| n.label.as_str())
            .collect();
        assert_eq!(labels, vec!["sub", "a.txt"]);
        assert!(app.local_tree.root().data.loaded);
        assert_eq!(app.selected_local_folder(), dir.path());
    }

    #[test]
    fn selected_folder_of_a_file_is_its_parent() {
        let (dir, mut app) = test_app(Arc::new(MemoryStore::new()));
        let path = app
            .local_tree
            .find(|obj| obj.name() == "a.txt")
            .unwrap();
        app.local_tree.select_path(&path);

        assert_eq!(app.selected_local_object().name(), "a.txt");
        assert_eq!(app.selected_local_folder(), dir.path());
    }

    #[test]
    fn focus_stays_local_without_a_bucket() {
        let (_dir, mut app) = test_app(Arc::new(MemoryStore::new()));
        app.switch_focus();
        assert_eq!(app.focus, Focus::Local);

        app.remote_tree = Some(TreeModel::new(TreeNode::branch("b", S3Object::folder(""))));
        app.switch_focus();
        assert_eq!(app.focus, Focus::Remote);
        app.switch_focus();
        assert_eq!(app.focus, Focus::Local);
    }
}
