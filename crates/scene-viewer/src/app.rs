use std::{path::Path, sync::Arc};

use anyhow::Result;
use winit::{event::WindowEvent, window::Window};

use crate::{
    data::{
        mesh_upload::{upload_lit_object, upload_mesh},
        types::{FrameUniforms, ObjectGpu},
    },
    input::InputState,
    renderer::Renderer,
    scene::{self, SceneState},
    texture::{load_scene_texture, SceneTexture},
    time::FrameClock,
};

/// Angular resolution of the carton-cap cylinder.
const SECTOR_COUNT: u16 = 100;
const CAP_RADIUS: f32 = 0.2;
const CAP_LENGTH: f32 = 0.2;

pub struct App {
    pub renderer: Renderer,
    pub scene: SceneState,
    pub input: InputState,
    clock: FrameClock,
    objects: Vec<ObjectGpu>,
    /// Texture bind groups indexed by `WrapMode::index`.
    texture_binds: [wgpu::BindGroup; 4],
    _texture: SceneTexture,
}

impl App {
    pub async fn new(window: Arc<Window>, texture_path: &Path) -> Result<Self> {
        let renderer = Renderer::new(window).await?;
        let device = &renderer.gfx.device;

        let texture = load_scene_texture(device, &renderer.gfx.queue, texture_path)?;
        let texture_binds: [wgpu::BindGroup; 4] = std::array::from_fn(|i| {
            renderer
                .lit
                .texture_bind_group(device, &texture.view, &texture.samplers[i])
        });

        let object_layout = &renderer.lit.object_layout;
        let mut rng = rand::thread_rng();

        let carton = upload_lit_object(
            device,
            object_layout,
            &procmesh::carton(),
            scene::CARTON_TRANSFORM.matrix(),
            "Carton",
        );

        let cap_mesh = procmesh::capped_cylinder(CAP_RADIUS, CAP_LENGTH, SECTOR_COUNT, &mut rng);
        let cap = upload_lit_object(
            device,
            object_layout,
            &cap_mesh,
            scene::CARTON_CAP_TRANSFORM.matrix(),
            "Carton Cap",
        );

        let pane_mesh = procmesh::table_pane();
        let table = upload_lit_object(
            device,
            object_layout,
            &pane_mesh,
            scene::TABLE_PANE_TRANSFORM.matrix(),
            "Table Pane 1",
        );
        let table2 = upload_lit_object(
            device,
            object_layout,
            &pane_mesh,
            scene::TABLE_PANE_2_TRANSFORM.matrix(),
            "Table Pane 2",
        );

        let marker = upload_mesh(device, &procmesh::unit_cube(), "Light Marker");

        let objects = vec![
            ObjectGpu::Lit(carton),
            ObjectGpu::Lit(cap),
            ObjectGpu::Lit(table),
            ObjectGpu::Lit(table2),
            ObjectGpu::FlatMarker(marker),
        ];

        log::info!("scene ready: {} objects", objects.len());

        Ok(Self {
            renderer,
            scene: SceneState::new(),
            input: InputState::new(),
            clock: FrameClock::new(),
            objects,
            texture_binds,
            _texture: texture,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.renderer.resize(new_size);
    }

    pub fn handle_event(&mut self, event: &WindowEvent) {
        self.input.handle_window_event(event);

        if let WindowEvent::Resized(physical_size) = event {
            self.resize(*physical_size);
        }
    }

    /// Runs one frame: timing, input, orbit, then the draw submission.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let dt = self.clock.tick();
        self.scene.apply_input(&mut self.input, dt);
        self.scene.update(dt);

        let frame = self.renderer.gfx.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_proj = self.scene.camera.projection(self.renderer.gfx.aspect())
            * self.scene.camera.view_matrix();
        let uniforms = FrameUniforms::new(&self.scene, view_proj);
        let lamp_mvp = view_proj * scene::lamp_model(self.scene.light.position);
        let texture_bind = &self.texture_binds[self.scene.settings.wrap_mode.index()];

        self.renderer
            .render(&swap_view, &uniforms, lamp_mvp, &self.objects, texture_bind);
        frame.present();

        Ok(())
    }
}
