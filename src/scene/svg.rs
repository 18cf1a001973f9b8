use std::io::Write;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{PlanviewError, PlanviewResult};
use crate::scene::visit::{GraphEdge, GraphVisitor};

/// Default cap on rendered visited edges per document.
pub const DEFAULT_EDGE_CAP: usize = 10_000;

/// Stroke styling and the visited-edge budget for the overlay document.
///
/// The solution path must stay visually distinguishable from visited edges,
/// so it defaults to a wide gold stroke against thin steel-blue edges.
#[derive(Clone, Debug)]
pub struct SceneStyle {
    /// Stroke color for the solution poly-line.
    pub path_stroke: String,
    /// Stroke width for the solution poly-line, in canvas units.
    pub path_stroke_width: f64,
    /// Stroke color for visited graph edges.
    pub edge_stroke: String,
    /// Stroke width for visited graph edges, in canvas units.
    pub edge_stroke_width: f64,
    /// Hard cap on rendered visited edges across the document's lifetime;
    /// edges past the cap are silently dropped to bound output size.
    pub max_visited_edges: usize,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            path_stroke: "#ffd700".to_owned(),
            path_stroke_width: 3.0,
            edge_stroke: "#4682b4".to_owned(),
            edge_stroke_width: 0.5,
            max_visited_edges: DEFAULT_EDGE_CAP,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WriterState {
    Unopened,
    Open,
    Closed,
}

/// How far through the body the open document has progressed. SVG paints in
/// document order, so the background must precede the overlay elements and
/// the solution path must precede the visited edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum BodyPhase {
    Start,
    BackgroundDrawn,
    PathDrawn,
    EdgesStarted,
}

/// Incremental SVG overlay writer.
///
/// Emits the document in strict order: header ([`open`]), body elements in
/// document order (background at most once, then the solution path at most
/// once, then visited edges), footer ([`close`]). Out-of-order calls return a
/// validation error before anything is written; once closed the document is
/// sealed. Planner coordinates map 1:1 onto the canvas (origin top-left),
/// and are written at full `f64` precision.
///
/// [`open`]: SvgSceneWriter::open
/// [`close`]: SvgSceneWriter::close
pub struct SvgSceneWriter<W: Write> {
    out: W,
    style: SceneStyle,
    state: WriterState,
    phase: BodyPhase,
    canvas: Option<Canvas>,
    edges_drawn: usize,
    cap_logged: bool,
}

impl<W: Write> SvgSceneWriter<W> {
    /// Create a writer with the default [`SceneStyle`].
    pub fn new(out: W) -> Self {
        Self::with_style(out, SceneStyle::default())
    }

    /// Create a writer with an explicit style.
    pub fn with_style(out: W, style: SceneStyle) -> Self {
        Self {
            out,
            style,
            state: WriterState::Unopened,
            phase: BodyPhase::Start,
            canvas: None,
            edges_drawn: 0,
            cap_logged: false,
        }
    }

    /// Write the document header, sizing the canvas to the source raster.
    /// Must be called exactly once, before any body element.
    pub fn open(&mut self, canvas: Canvas) -> PlanviewResult<()> {
        match self.state {
            WriterState::Unopened => {}
            WriterState::Open => {
                return Err(PlanviewError::validation("open called twice"));
            }
            WriterState::Closed => {
                return Err(PlanviewError::validation("writer is closed"));
            }
        }
        writeln!(
            self.out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = canvas.width,
            h = canvas.height,
        )
        .context("write svg header")?;
        self.canvas = Some(canvas);
        self.state = WriterState::Open;
        Ok(())
    }

    /// Embed a reference to the source raster, filling the full canvas.
    /// Optional; a document without a background is valid. Must be the first
    /// body element — the overlay paints in document order, so a later
    /// background would cover the path and edges.
    pub fn draw_background(&mut self, image_href: &str) -> PlanviewResult<()> {
        self.ensure_open("draw_background")?;
        match self.phase {
            BodyPhase::Start => {}
            BodyPhase::BackgroundDrawn => {
                return Err(PlanviewError::validation("draw_background called twice"));
            }
            _ => {
                return Err(PlanviewError::validation(
                    "draw_background called after overlay elements",
                ));
            }
        }
        let canvas = self.canvas.expect("canvas set when open");
        writeln!(
            self.out,
            r#"<image x="0" y="0" width="{}" height="{}" xlink:href="{}"/>"#,
            canvas.width,
            canvas.height,
            xml_escape(image_href),
        )
        .context("write svg background")?;
        self.phase = BodyPhase::BackgroundDrawn;
        Ok(())
    }

    /// Draw the solution as one connected poly-line through `path` in order.
    /// Paths with fewer than two points have no edge to draw and emit
    /// nothing. At most one path per document, before any visited edges.
    pub fn draw_solution_path(&mut self, path: &[Point]) -> PlanviewResult<()> {
        self.ensure_open("draw_solution_path")?;
        match self.phase {
            BodyPhase::Start | BodyPhase::BackgroundDrawn => {}
            BodyPhase::PathDrawn => {
                return Err(PlanviewError::validation("draw_solution_path called twice"));
            }
            BodyPhase::EdgesStarted => {
                return Err(PlanviewError::validation(
                    "draw_solution_path called after visited edges",
                ));
            }
        }
        self.phase = BodyPhase::PathDrawn;
        if path.len() < 2 {
            return Ok(());
        }
        write!(
            self.out,
            r#"<polyline fill="none" stroke="{}" stroke-width="{}" points=""#,
            self.style.path_stroke, self.style.path_stroke_width,
        )
        .context("write svg path")?;
        for (i, p) in path.iter().enumerate() {
            let sep = if i == 0 { "" } else { " " };
            write!(self.out, "{sep}{},{}", p.x, p.y).context("write svg path")?;
        }
        writeln!(self.out, r#""/>"#).context("write svg path")?;
        Ok(())
    }

    /// Render a stream of visited edges as line segments, in delivery order,
    /// up to the style's edge cap. Excess edges are dropped without error.
    pub fn draw_visited_edges<I>(&mut self, edges: I) -> PlanviewResult<()>
    where
        I: IntoIterator<Item = GraphEdge>,
    {
        self.ensure_open("draw_visited_edges")?;
        for edge in edges {
            self.draw_visited_edge(edge)?;
        }
        Ok(())
    }

    /// Render one visited edge, subject to the running cap.
    pub fn draw_visited_edge(&mut self, edge: GraphEdge) -> PlanviewResult<()> {
        self.ensure_open("draw_visited_edge")?;
        self.phase = BodyPhase::EdgesStarted;
        if self.edges_drawn >= self.style.max_visited_edges {
            if !self.cap_logged {
                tracing::debug!(
                    cap = self.style.max_visited_edges,
                    "visited-edge cap reached; dropping further edges"
                );
                self.cap_logged = true;
            }
            return Ok(());
        }
        self.edges_drawn += 1;
        writeln!(
            self.out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            edge.from.x,
            edge.from.y,
            edge.to.x,
            edge.to.y,
            self.style.edge_stroke,
            self.style.edge_stroke_width,
        )
        .context("write svg edge")?;
        Ok(())
    }

    /// Write the footer and seal the document. Must be called exactly once,
    /// last; all writes after it are rejected.
    pub fn close(&mut self) -> PlanviewResult<()> {
        self.ensure_open("close")?;
        writeln!(self.out, "</svg>").context("write svg footer")?;
        self.out.flush().context("flush svg output")?;
        self.state = WriterState::Closed;
        Ok(())
    }

    /// Number of visited edges rendered so far.
    pub fn edges_drawn(&self) -> usize {
        self.edges_drawn
    }

    /// Release the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn ensure_open(&self, op: &str) -> PlanviewResult<()> {
        match self.state {
            WriterState::Open => Ok(()),
            WriterState::Unopened => Err(PlanviewError::validation(format!(
                "{op} called before open"
            ))),
            WriterState::Closed => Err(PlanviewError::validation(format!(
                "{op} called after close"
            ))),
        }
    }
}

/// Streams a planner's graph walk straight into a writer.
///
/// [`GraphVisitor`] callbacks are infallible, so the first write error is
/// parked and surfaced by [`SceneVisitor::finish`]; subsequent edges are
/// skipped once an error is pending.
pub struct SceneVisitor<'a, W: Write> {
    writer: &'a mut SvgSceneWriter<W>,
    error: Option<PlanviewError>,
}

impl<'a, W: Write> SceneVisitor<'a, W> {
    /// Wrap a writer that already has an open document.
    pub fn new(writer: &'a mut SvgSceneWriter<W>) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Surface any write error hit during the walk.
    pub fn finish(self) -> PlanviewResult<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<W: Write> GraphVisitor for SceneVisitor<'_, W> {
    fn vertex(&mut self, _q: Point) {}

    fn edge(&mut self, from: Point, to: Point) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.writer.draw_visited_edge(GraphEdge::new(from, to)) {
            self.error = Some(e);
        }
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_writer() -> SvgSceneWriter<Vec<u8>> {
        let mut w = SvgSceneWriter::new(Vec::new());
        w.open(Canvas::new(100, 100).unwrap()).unwrap();
        w
    }

    fn doc(w: SvgSceneWriter<Vec<u8>>) -> String {
        String::from_utf8(w.into_inner()).unwrap()
    }

    #[test]
    fn header_declares_canvas_size() {
        let mut w = open_writer();
        w.close().unwrap();
        let out = doc(w);
        assert!(out.starts_with("<svg "));
        assert!(out.contains(r#"width="100" height="100""#));
        assert!(out.contains(r#"viewBox="0 0 100 100""#));
        assert!(out.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn body_before_open_is_rejected() {
        let mut w = SvgSceneWriter::new(Vec::new());
        assert!(matches!(
            w.draw_solution_path(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]),
            Err(PlanviewError::Validation(_))
        ));
        assert!(matches!(
            w.draw_visited_edge(GraphEdge::new(Point::ZERO, Point::new(1.0, 1.0))),
            Err(PlanviewError::Validation(_))
        ));
        assert!(matches!(w.close(), Err(PlanviewError::Validation(_))));
        // Nothing was written by the rejected calls.
        assert!(w.into_inner().is_empty());
    }

    #[test]
    fn double_open_and_writes_after_close_are_rejected() {
        let mut w = open_writer();
        assert!(w.open(Canvas::new(100, 100).unwrap()).is_err());
        w.close().unwrap();
        assert!(w.close().is_err());
        assert!(w.draw_background("bg.png").is_err());
        assert!(w
            .draw_solution_path(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)])
            .is_err());
    }

    #[test]
    fn short_paths_emit_nothing() {
        for path in [Vec::new(), vec![Point::new(5.0, 5.0)]] {
            let mut w = open_writer();
            w.draw_solution_path(&path).unwrap();
            w.close().unwrap();
            assert!(!doc(w).contains("<polyline"));
        }
    }

    #[test]
    fn background_after_overlay_is_rejected() {
        let mut w = open_writer();
        w.draw_solution_path(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)])
            .unwrap();
        w.draw_visited_edge(GraphEdge::new(Point::ZERO, Point::new(1.0, 1.0)))
            .unwrap();
        assert!(matches!(
            w.draw_background("map.png"),
            Err(PlanviewError::Validation(_))
        ));
        w.close().unwrap();
        // The rejected call wrote nothing, so nothing paints over the overlay.
        assert!(!doc(w).contains("<image"));
    }

    #[test]
    fn duplicate_background_and_path_are_rejected() {
        let mut w = open_writer();
        w.draw_background("map.png").unwrap();
        assert!(matches!(
            w.draw_background("map.png"),
            Err(PlanviewError::Validation(_))
        ));
        let path = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        w.draw_solution_path(&path).unwrap();
        assert!(matches!(
            w.draw_solution_path(&path),
            Err(PlanviewError::Validation(_))
        ));
        w.close().unwrap();
        assert_eq!(doc(w).matches("<image ").count(), 1);
    }

    #[test]
    fn path_after_edges_is_rejected() {
        let mut w = open_writer();
        w.draw_visited_edge(GraphEdge::new(Point::ZERO, Point::new(1.0, 1.0)))
            .unwrap();
        assert!(matches!(
            w.draw_solution_path(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]),
            Err(PlanviewError::Validation(_))
        ));
        // Edges may keep streaming after the rejected call.
        w.draw_visited_edge(GraphEdge::new(Point::new(1.0, 1.0), Point::new(2.0, 2.0)))
            .unwrap();
        w.close().unwrap();
        assert_eq!(doc(w).matches("<line ").count(), 2);
    }

    #[test]
    fn path_points_appear_in_order() {
        let mut w = open_writer();
        w.draw_solution_path(&[
            Point::new(0.0, 0.0),
            Point::new(50.0, 50.0),
            Point::new(99.0, 99.0),
        ])
        .unwrap();
        w.close().unwrap();
        let out = doc(w);
        assert!(out.contains(r#"points="0,0 50,50 99,99""#));
    }

    #[test]
    fn coordinates_keep_sub_pixel_precision() {
        let mut w = open_writer();
        w.draw_solution_path(&[Point::new(0.25, 1.5), Point::new(2.125, 3.75)])
            .unwrap();
        w.close().unwrap();
        assert!(doc(w).contains(r#"points="0.25,1.5 2.125,3.75""#));
    }

    #[test]
    fn edge_cap_drops_excess_silently() {
        let mut w = open_writer();
        let edges = (0..10_050)
            .map(|i| GraphEdge::new(Point::new(i as f64, 0.0), Point::new(i as f64, 1.0)));
        w.draw_visited_edges(edges).unwrap();
        assert_eq!(w.edges_drawn(), DEFAULT_EDGE_CAP);
        w.close().unwrap();
        let out = doc(w);
        assert_eq!(out.matches("<line ").count(), DEFAULT_EDGE_CAP);
        // First and last rendered edges, in delivery order.
        assert!(out.contains(r#"x1="0" y1="0""#));
        assert!(out.contains(r#"x1="9999" y1="0""#));
        assert!(!out.contains(r#"x1="10000""#));
    }

    #[test]
    fn edge_cap_spans_multiple_calls() {
        let style = SceneStyle {
            max_visited_edges: 3,
            ..SceneStyle::default()
        };
        let mut w = SvgSceneWriter::with_style(Vec::new(), style);
        w.open(Canvas::new(10, 10).unwrap()).unwrap();
        let edge = GraphEdge::new(Point::ZERO, Point::new(1.0, 1.0));
        w.draw_visited_edges(vec![edge; 2]).unwrap();
        w.draw_visited_edges(vec![edge; 2]).unwrap();
        assert_eq!(w.edges_drawn(), 3);
    }

    #[test]
    fn scene_visitor_streams_edges_through_cap() {
        let mut w = open_writer();
        let mut visitor = SceneVisitor::new(&mut w);
        visitor.vertex(Point::new(1.0, 2.0));
        visitor.edge(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        visitor.edge(Point::new(3.0, 4.0), Point::new(5.0, 6.0));
        visitor.finish().unwrap();
        assert_eq!(w.edges_drawn(), 2);
        w.close().unwrap();
        assert_eq!(doc(w).matches("<line ").count(), 2);
    }

    #[test]
    fn background_href_is_escaped() {
        let mut w = open_writer();
        w.draw_background("maps/a&b.png").unwrap();
        w.close().unwrap();
        assert!(doc(w).contains(r#"xlink:href="maps/a&amp;b.png""#));
    }
}
