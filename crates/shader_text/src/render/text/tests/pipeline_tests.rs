use std::cell::Cell;
use std::rc::Rc;

use approx::assert_relative_eq;

use crate::core::ShaderTextConfig;
use crate::foundation::math::Vec4;
use crate::render::api::{DeviceBuffer, DeviceResult, HostBuffer, QuadMesh};
use crate::render::text::{GlyphIndex, LayoutRect, ShaderTextRenderer, TextAnchor, BLANK};

fn renderer(config: ShaderTextConfig) -> ShaderTextRenderer<HostBuffer> {
    ShaderTextRenderer::new(&config)
}

/// Device that counts `release` calls in a shared counter
struct CountingDevice {
    capacity: usize,
    releases: Rc<Cell<usize>>,
}

impl DeviceBuffer for CountingDevice {
    fn create(capacity: usize, _element_size: usize) -> DeviceResult<Self> {
        Ok(Self {
            capacity,
            releases: Rc::new(Cell::new(0)),
        })
    }

    fn write(&mut self, _elements: &[GlyphIndex]) -> DeviceResult<()> {
        Ok(())
    }

    fn release(&mut self) {
        self.releases.set(self.releases.get() + 1);
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

fn counting_renderer(releases: &Rc<Cell<usize>>) -> ShaderTextRenderer<CountingDevice> {
    let config = ShaderTextConfig::default().with_max_characters(4);
    let device = CountingDevice {
        capacity: 4,
        releases: Rc::clone(releases),
    };
    ShaderTextRenderer::with_device(&config, Some(device))
}

fn device_glyphs(renderer: &ShaderTextRenderer<HostBuffer>) -> Vec<u8> {
    renderer.device().map(|d| d.elements().to_vec()).unwrap_or_default()
}

#[test]
fn test_second_slot_reflects_text_change() {
    let mut label = renderer(ShaderTextConfig::default().with_max_characters(2));

    label.set_text("AA");
    assert_eq!(device_glyphs(&label), vec![10, 10]);

    label.set_text("A0");
    assert_eq!(device_glyphs(&label), vec![10, 0]);
}

#[test]
fn test_unsupported_characters_render_blank_and_lowercase_aliases() {
    let mut label = renderer(ShaderTextConfig::default().with_max_characters(6));
    label.set_text("a!B?:");
    // lowercase aliases uppercase
    assert_eq!(device_glyphs(&label), vec![10, BLANK, 11, BLANK, 37, BLANK]);
}

#[test]
fn test_fps_style_label_uploads_once() {
    let mut label = renderer(ShaderTextConfig::default());
    let writes_before = label.device().map_or(0, HostBuffer::write_count);

    label
        .formatter()
        .string("FPS:")
        .int(144)
        .char(' ')
        .float(6.94, 1)
        .string("MS")
        .clear_rest();
    label.apply_pending_writes();

    assert_eq!(label.slots().to_string(), "FPS:144 6.9MS   ");
    assert_eq!(label.device().map_or(0, HostBuffer::write_count), writes_before + 1);
}

#[test]
fn test_mesh_carries_slot_indices_in_order() {
    let mut label = renderer(
        ShaderTextConfig::default()
            .with_max_characters(5)
            .with_metrics(10.0, 20.0, 0.0)
            .with_text("12345"),
    );

    let mut mesh = QuadMesh::new();
    let emitted = label.populate_mesh(LayoutRect::new(0.0, 0.0, 100.0, 20.0), &mut mesh);

    assert_eq!(emitted, 5);
    for (index, vertex) in mesh.vertices().iter().enumerate() {
        assert_eq!(vertex.slot() as usize, index / 4);
    }
    assert_eq!(mesh.indices().len(), 30);
}

#[test]
fn test_overflowing_slots_are_not_meshed_but_still_uploaded() {
    let mut label = renderer(ShaderTextConfig::default().with_max_characters(8).with_text("ABCDEFGH"));

    let mut mesh = QuadMesh::new();
    let emitted = label.populate_mesh(LayoutRect::new(0.0, 0.0, 50.0, 30.0), &mut mesh);

    assert_eq!(emitted, 3);
    assert_eq!(mesh.quad_count(), 3);
    assert_eq!(device_glyphs(&label).len(), 8);
}

#[test]
fn test_repopulating_mesh_replaces_previous_geometry() {
    let mut label = renderer(ShaderTextConfig::default().with_max_characters(4));
    let mut mesh = QuadMesh::new();

    label.populate_mesh(LayoutRect::new(0.0, 0.0, 200.0, 30.0), &mut mesh);
    assert_eq!(mesh.quad_count(), 4);

    label.populate_mesh(LayoutRect::new(0.0, 0.0, 20.0, 30.0), &mut mesh);
    assert_eq!(mesh.quad_count(), 1);
}

#[test]
fn test_centered_label_geometry() {
    let mut label = renderer(
        ShaderTextConfig::default()
            .with_max_characters(2)
            .with_metrics(10.0, 10.0, 2.0)
            .with_alignment(TextAnchor::MiddleCenter),
    );
    label.set_color(Vec4::new(0.0, 1.0, 0.0, 1.0));

    let mut mesh = QuadMesh::new();
    label.populate_mesh(LayoutRect::new(-50.0, -50.0, 100.0, 100.0), &mut mesh);

    // Content is 22 wide and 10 tall, centered on the origin
    let first = mesh.vertices()[0];
    let last = mesh.vertices()[7];
    assert_relative_eq!(first.position[0], -11.0);
    assert_relative_eq!(first.position[1], -5.0);
    assert_relative_eq!(last.position[0], 11.0);
    assert_relative_eq!(last.position[1], -5.0);
    assert_eq!(first.color, [0.0, 1.0, 0.0, 1.0]);
}

#[test]
fn test_capacity_rebuild_keeps_text_on_device() {
    let mut label = renderer(ShaderTextConfig::default().with_max_characters(3).with_text("HI"));
    label.set_capacity(5);

    assert_eq!(label.device().map(DeviceBuffer::capacity), Some(5));
    assert_eq!(device_glyphs(&label), vec![17, 18, BLANK, BLANK, BLANK]);
}

#[test]
fn test_release_then_drop_releases_once() {
    let releases = Rc::new(Cell::new(0));
    let mut label = counting_renderer(&releases);

    label.release();
    assert!(label.device().is_none());
    assert_eq!(releases.get(), 1);

    label.release();
    drop(label);
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_drop_releases_device() {
    let releases = Rc::new(Cell::new(0));
    let label = counting_renderer(&releases);
    assert_eq!(releases.get(), 0);

    drop(label);
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_capacity_rebuild_releases_old_device() {
    let releases = Rc::new(Cell::new(0));
    let mut label = counting_renderer(&releases);

    label.set_capacity(8);
    assert_eq!(releases.get(), 1);
    assert_eq!(label.device().map(DeviceBuffer::capacity), Some(8));
}
