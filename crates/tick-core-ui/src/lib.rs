#![warn(missing_docs)]
//! Tick Core UI - composition layer for `tick-core`.
//!
//! # Overview
//!
//! `tick-core-ui` owns everything between the headless annotation model
//! and the host's widget toolkit:
//!
//! - **Task queue**: deferred, serialized execution on the host's single
//!   UI thread with disposal-checked tasks ([`queue`])
//! - **Listener lifecycle**: install/rebind/uninstall of annotation model
//!   subscriptions, one refresh task per mutation event ([`listener`])
//! - **Tree refresh**: depth-first icon-identity diffing over materialized
//!   tree items ([`tree`])
//! - **Icons**: severity overlay composition over host icon ids ([`icons`])
//! - **Editor inputs**: the closed input variant set with JSON persistence
//!   ([`input`])
//! - **Command registry**: immutable id → presentation-record mapping with
//!   locale accelerator overrides ([`commands`])
//!
//! # Data Flow
//!
//! ```text
//! reconciler thread                     UI thread
//! ─────────────────                     ─────────
//! AnnotationModel mutates
//!   └─ event ──> listener ──> UiQueue ──> run_pending()
//!                                           └─ target.refresh()
//!                                                └─ scan severities,
//!                                                   diff + swap icons
//! ```
//!
//! Refreshes are not coalesced: each mutation enqueues one task and tasks
//! run in enqueue order, so the last one's result wins visually while
//! earlier ones are redundant but harmless. A disposed target turns its
//! queued tasks into no-ops; that is the expected teardown race.

pub mod commands;
pub mod icons;
pub mod input;
pub mod listener;
pub mod queue;
pub mod tree;

pub use commands::{CommandRegistry, CommandRegistryError, CommandSpec};
pub use icons::{
    ERROR_OVERLAY, IconId, OVERLAY_MASK, WARNING_OVERLAY, base_icon, overlay_severity,
    with_severity_overlay,
};
pub use input::{DocumentKey, EditorInput, InputError};
pub use listener::{ErrorTickListener, RefreshTarget, TitleTick};
pub use queue::{Disposable, DisposeFlag, UiQueue};
pub use tree::{ElementIcon, LabelProvider, OutlineView, TickLabelProvider, TreeItem, TreeWidget};
