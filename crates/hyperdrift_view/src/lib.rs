//! View feeds for Hyperdrift
//!
//! Pure read-only projections of world state into drawable data. The engine
//! never constructs meshes or materials; an external renderer consumes the
//! [`RenderFeed`] and a 2D overlay consumes the minimap feeds.

mod render_feed;
mod minimap;

pub use render_feed::{
    build_render_feed, w_falloff_opacity, EntitySprite, FeedConfig, PlayerPlacement, RenderFeed,
    SpriteKind,
};
pub use minimap::{
    side_view, top_down, DepthTick, GuideLine, Marker, MinimapConfig, PlayerTriangle,
    SideViewFeed, TopDownFeed,
};
