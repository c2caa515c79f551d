//! # SolidForge Designer
//!
//! Modeling operations and the export pipeline for SolidForge, plus the
//! geometry backends they delegate to.
//!
//! ## Core Components
//!
//! ### Session
//! - **Session**: owns the workspace registry, the selected geometry engine and
//!   the artifact directory; every request runs against one session
//! - **Modeling**: primitive creation, boolean combination, scripted shapes
//! - **Export**: STL and STEP-family export with validation and previews
//!
//! ### Backends
//! - **CSG**: `csgrs` mesh solids
//! - **Fake**: deterministic axis-aligned boxes for tests
//!
//! ### Output
//! - **STL / STEP writers** shared by both backends
//! - **Renderer**: flat-shaded isometric PNG previews
//! - **Scripts**: a small sandboxed modeling language
//!
//! ## Architecture
//!
//! ```text
//! Session
//!   ├── WorkspaceRegistry (solidforge-core)
//!   ├── GeometryEngine (backend::csg | backend::fake)
//!   │     └── io::stl / io::step
//!   └── ArtifactStore ({name}.{ext} files)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use solidforge_designer::{backend::FakeEngine, ArtifactStore, Session};
//!
//! let artifacts = ArtifactStore::scratch()?;
//! let mut session = Session::new(Box::new(FakeEngine::new()), artifacts);
//!
//! session.create_box(2.0, 3.0, 4.0, true, Some("b1"))?;
//! session.create_cylinder(1.0, 5.0, true, Some("c1"))?;
//! session.boolean_operation("subtract", "b1", "c1", Some("result1"))?;
//! let report = session.export_object("result1", "step", true)?;
//! ```

pub mod artifacts;
pub mod backend;
pub mod export;
pub mod io;
pub mod modeling;
pub mod render;
pub mod script;
pub mod session;

pub use artifacts::{ArtifactFiles, ArtifactStore};
pub use backend::{engine_from_settings, CsgEngine, FakeEngine};
pub use export::validate_step_file;
pub use modeling::{Dimensions, ObjectReport, WorkspaceList, WorkspaceReport};
pub use session::Session;
