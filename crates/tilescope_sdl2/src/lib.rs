use anyhow::Result;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Texture, WindowCanvas};
use typed_builder::TypedBuilder;

pub use sdl2;
use tilescope_core::{Color, FrameSet, PixelBuffer, PANEL_DIM, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Keys the surface forwards to the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    R,
    None,
}

/// Application seam the viewer implements: produce a frame set per refresh
/// and react to key events. The surface owns the window and textures.
pub trait App {
    fn init(&mut self);
    /// Fill `frames` for the next displayed refresh.
    fn update(&mut self, frames: &mut FrameSet);
    fn handle_key_event(&mut self, key: Key, is_down: bool);
    fn should_exit(&self) -> bool;
    fn exit(&mut self);
    fn title(&self) -> String;
}

#[derive(TypedBuilder)]
pub struct SdlInitInfo {
    pub title: String,
    #[builder(default = 2)]
    pub scale: u32,
}

/// Gap between panels and around the window edge, in logical pixels.
const PADDING: u32 = 8;

/// Logical window width: atlas plus the two map panels in a row.
const SURFACE_WIDTH: u32 = PADDING * 4 + PANEL_DIM as u32 * 3;
/// Logical window height: map row plus the two screen-sized layers below.
const SURFACE_HEIGHT: u32 = PADDING * 3 + PANEL_DIM as u32 + SCREEN_HEIGHT as u32;

/// Top-left corners of the five panels, in logical pixels.
const ATLAS_ORIGIN: (i32, i32) = (PADDING as i32, PADDING as i32);
const MAP0_ORIGIN: (i32, i32) = (PADDING as i32 * 2 + PANEL_DIM as i32, PADDING as i32);
const MAP1_ORIGIN: (i32, i32) = (PADDING as i32 * 3 + PANEL_DIM as i32 * 2, PADDING as i32);
const WINDOW_ORIGIN: (i32, i32) = (PADDING as i32, PADDING as i32 * 2 + PANEL_DIM as i32);
const SPRITES_ORIGIN: (i32, i32) = (
    PADDING as i32 * 2 + SCREEN_WIDTH as i32,
    PADDING as i32 * 2 + PANEL_DIM as i32,
);

/// Backdrop behind the alpha-blended window/sprite layers, so transparent
/// pixels read as "nothing here" rather than black.
const LAYER_BACKDROP: Color = Color::new_rgb(60, 60, 60);

pub struct SdlContext;

impl SdlContext {
    pub fn run(init_info: SdlInitInfo, mut app: impl App) -> Result<()> {
        let SdlInitInfo { title, scale } = init_info;
        log::debug!("sdl surface {SURFACE_WIDTH}x{SURFACE_HEIGHT} at scale {scale}");

        let sdl_context = sdl2::init().map_err(anyhow::Error::msg)?;
        let video_subsystem = sdl_context.video().map_err(anyhow::Error::msg)?;
        let window = video_subsystem
            .window(&title, SURFACE_WIDTH * scale, SURFACE_HEIGHT * scale)
            .position_centered()
            .build()?;
        let mut canvas = window.into_canvas().present_vsync().build()?;
        canvas
            .set_scale(scale as f32, scale as f32)
            .map_err(anyhow::Error::msg)?;
        let creator = canvas.texture_creator();

        let panel_dim = PANEL_DIM as u32;
        let screen_w = SCREEN_WIDTH as u32;
        let screen_h = SCREEN_HEIGHT as u32;
        let mut atlas_tex = creator.create_texture_streaming(
            PixelFormatEnum::RGBA32,
            panel_dim,
            panel_dim,
        )?;
        let mut map0_tex = creator.create_texture_streaming(
            PixelFormatEnum::RGBA32,
            panel_dim,
            panel_dim,
        )?;
        let mut map1_tex = creator.create_texture_streaming(
            PixelFormatEnum::RGBA32,
            panel_dim,
            panel_dim,
        )?;
        let mut window_tex =
            creator.create_texture_streaming(PixelFormatEnum::RGBA32, screen_w, screen_h)?;
        let mut sprites_tex =
            creator.create_texture_streaming(PixelFormatEnum::RGBA32, screen_w, screen_h)?;
        // The atlas and the two layers carry alpha.
        atlas_tex.set_blend_mode(BlendMode::Blend);
        window_tex.set_blend_mode(BlendMode::Blend);
        sprites_tex.set_blend_mode(BlendMode::Blend);

        let mut event_pump = sdl_context.event_pump().map_err(anyhow::Error::msg)?;
        let mut frames = FrameSet::new();
        app.init();

        loop {
            if app.should_exit() {
                app.exit();
                break;
            }

            while let Some(event) = event_pump.poll_event() {
                match event {
                    Event::Quit { .. } => {
                        app.exit();
                        return Ok(());
                    }
                    Event::KeyDown {
                        keycode: Some(keycode),
                        ..
                    } => app.handle_key_event(map_keycode(keycode), true),
                    Event::KeyUp {
                        keycode: Some(keycode),
                        ..
                    } => app.handle_key_event(map_keycode(keycode), false),
                    _ => {}
                }
            }

            app.update(&mut frames);

            upload(&mut atlas_tex, &frames.atlas)?;
            upload(&mut map0_tex, &frames.background[0])?;
            upload(&mut map1_tex, &frames.background[1])?;
            upload(&mut window_tex, &frames.window)?;
            upload(&mut sprites_tex, &frames.sprites)?;

            canvas.set_draw_color(sdl2::pixels::Color::RGB(24, 24, 24));
            canvas.clear();

            // Backdrops for the alpha-blended panels.
            canvas.set_draw_color(sdl2::pixels::Color::RGB(
                LAYER_BACKDROP.r,
                LAYER_BACKDROP.g,
                LAYER_BACKDROP.b,
            ));
            for (origin, w, h) in [
                (ATLAS_ORIGIN, panel_dim, panel_dim),
                (WINDOW_ORIGIN, screen_w, screen_h),
                (SPRITES_ORIGIN, screen_w, screen_h),
            ] {
                canvas
                    .fill_rect(Rect::new(origin.0, origin.1, w, h))
                    .map_err(anyhow::Error::msg)?;
            }

            blit(&mut canvas, &atlas_tex, ATLAS_ORIGIN, panel_dim, panel_dim)?;
            blit(&mut canvas, &map0_tex, MAP0_ORIGIN, panel_dim, panel_dim)?;
            blit(&mut canvas, &map1_tex, MAP1_ORIGIN, panel_dim, panel_dim)?;
            blit(&mut canvas, &window_tex, WINDOW_ORIGIN, screen_w, screen_h)?;
            blit(&mut canvas, &sprites_tex, SPRITES_ORIGIN, screen_w, screen_h)?;

            draw_viewport(&mut canvas, &frames)?;

            canvas.present();
            std::thread::sleep(std::time::Duration::from_millis(16));
        }

        Ok(())
    }
}

fn upload(texture: &mut Texture<'_>, panel: &PixelBuffer) -> Result<()> {
    texture
        .update(None, panel.bytes(), panel.width() * 4)
        .map_err(anyhow::Error::from)?;
    Ok(())
}

fn blit(
    canvas: &mut WindowCanvas,
    texture: &Texture<'_>,
    origin: (i32, i32),
    width: u32,
    height: u32,
) -> Result<()> {
    canvas
        .copy(texture, None, Rect::new(origin.0, origin.1, width, height))
        .map_err(anyhow::Error::msg)?;
    Ok(())
}

/// Outline the scroll viewport on the first background map panel, clipped
/// to that panel. Large SCX/SCY values push the rectangle off the panel
/// edge; the visible part is cropped, not wrapped.
fn draw_viewport(canvas: &mut WindowCanvas, frames: &FrameSet) -> Result<()> {
    let vp = frames.viewport;
    let panel = Rect::new(MAP0_ORIGIN.0, MAP0_ORIGIN.1, PANEL_DIM as u32, PANEL_DIM as u32);
    let outline = Rect::new(
        MAP0_ORIGIN.0 + vp.x as i32,
        MAP0_ORIGIN.1 + vp.y as i32,
        vp.width,
        vp.height,
    );
    if let Some(visible) = panel.intersection(outline) {
        let c = Color::VIEWPORT;
        canvas.set_draw_color(sdl2::pixels::Color::RGB(c.r, c.g, c.b));
        canvas.draw_rect(visible).map_err(anyhow::Error::msg)?;
    }
    Ok(())
}

pub fn map_keycode(keycode: Keycode) -> Key {
    match keycode {
        Keycode::Escape => Key::Escape,
        Keycode::R => Key::R,
        _ => Key::None,
    }
}
