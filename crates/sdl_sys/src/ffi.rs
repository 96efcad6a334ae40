use core::ffi::{c_char, c_int, c_long, c_void};

use crate::*;

unsafe extern "C" {
    // SDL.h
    pub fn SDL_Init(flags: u32) -> c_int;
    pub fn SDL_InitSubSystem(flags: u32) -> c_int;
    pub fn SDL_QuitSubSystem(flags: u32);
    pub fn SDL_WasInit(flags: u32) -> u32;
    pub fn SDL_Quit();

    // SDL_version.h
    pub fn SDL_GetVersion(ver: *mut Version);
    pub fn SDL_GetRevision() -> *const c_char;

    // SDL_error.h
    pub fn SDL_GetError() -> *const c_char;
    pub fn SDL_SetError(fmt: *const c_char, ...) -> c_int;
    pub fn SDL_ClearError();

    // SDL_stdinc.h
    pub fn SDL_malloc(size: usize) -> *mut c_void;
    pub fn SDL_free(mem: *mut c_void);

    // SDL_hints.h
    pub fn SDL_SetHint(name: *const c_char, value: *const c_char) -> SDL_bool;
    pub fn SDL_GetHint(name: *const c_char) -> *const c_char;
    pub fn SDL_ClearHints();

    // SDL_clipboard.h
    pub fn SDL_SetClipboardText(text: *const c_char) -> c_int;
    pub fn SDL_GetClipboardText() -> *mut c_char;
    pub fn SDL_HasClipboardText() -> SDL_bool;

    // SDL_events.h
    pub fn SDL_PumpEvents();
    pub fn SDL_PeepEvents(
        events: *mut EventUnion,
        numevents: c_int,
        action: c_int,
        min_type: u32,
        max_type: u32,
    ) -> c_int;
    pub fn SDL_HasEvent(type_: u32) -> SDL_bool;
    pub fn SDL_HasEvents(min_type: u32, max_type: u32) -> SDL_bool;
    pub fn SDL_FlushEvent(type_: u32);
    pub fn SDL_FlushEvents(min_type: u32, max_type: u32);
    pub fn SDL_PollEvent(event: *mut EventUnion) -> c_int;
    pub fn SDL_WaitEvent(event: *mut EventUnion) -> c_int;
    pub fn SDL_WaitEventTimeout(event: *mut EventUnion, timeout: c_int) -> c_int;
    pub fn SDL_PushEvent(event: *mut EventUnion) -> c_int;
    pub fn SDL_EventState(type_: u32, state: c_int) -> u8;
    pub fn SDL_RegisterEvents(numevents: c_int) -> u32;

    // SDL_video.h
    pub fn SDL_GetNumVideoDisplays() -> c_int;
    pub fn SDL_GetDisplayBounds(display_index: c_int, rect: *mut Rect) -> c_int;
    pub fn SDL_GetNumDisplayModes(display_index: c_int) -> c_int;
    pub fn SDL_GetDisplayMode(display_index: c_int, mode_index: c_int, mode: *mut DisplayMode)
        -> c_int;
    pub fn SDL_GetDesktopDisplayMode(display_index: c_int, mode: *mut DisplayMode) -> c_int;
    pub fn SDL_GetCurrentVideoDriver() -> *const c_char;
    pub fn SDL_CreateWindow(
        title: *const c_char,
        x: c_int,
        y: c_int,
        w: c_int,
        h: c_int,
        flags: u32,
    ) -> *mut SDL_Window;
    pub fn SDL_DestroyWindow(window: *mut SDL_Window);
    pub fn SDL_GetWindowID(window: *mut SDL_Window) -> u32;
    pub fn SDL_GetWindowTitle(window: *mut SDL_Window) -> *const c_char;
    pub fn SDL_SetWindowTitle(window: *mut SDL_Window, title: *const c_char);
    pub fn SDL_GetWindowPosition(window: *mut SDL_Window, x: *mut c_int, y: *mut c_int);
    pub fn SDL_SetWindowPosition(window: *mut SDL_Window, x: c_int, y: c_int);
    pub fn SDL_GetWindowSize(window: *mut SDL_Window, w: *mut c_int, h: *mut c_int);
    pub fn SDL_SetWindowSize(window: *mut SDL_Window, w: c_int, h: c_int);
    pub fn SDL_GetWindowFlags(window: *mut SDL_Window) -> u32;
    pub fn SDL_ShowWindow(window: *mut SDL_Window);
    pub fn SDL_HideWindow(window: *mut SDL_Window);
    pub fn SDL_RaiseWindow(window: *mut SDL_Window);
    pub fn SDL_MaximizeWindow(window: *mut SDL_Window);
    pub fn SDL_MinimizeWindow(window: *mut SDL_Window);
    pub fn SDL_RestoreWindow(window: *mut SDL_Window);
    pub fn SDL_SetWindowFullscreen(window: *mut SDL_Window, flags: u32) -> c_int;
    pub fn SDL_GetWindowDisplayIndex(window: *mut SDL_Window) -> c_int;
    pub fn SDL_GL_CreateContext(window: *mut SDL_Window) -> SDL_GLContext;
    pub fn SDL_GL_DeleteContext(context: SDL_GLContext);
    pub fn SDL_GL_SetAttribute(attr: c_int, value: c_int) -> c_int;
    pub fn SDL_GL_SwapWindow(window: *mut SDL_Window);

    // SDL_render.h
    pub fn SDL_CreateRenderer(window: *mut SDL_Window, index: c_int, flags: u32)
        -> *mut SDL_Renderer;
    pub fn SDL_DestroyRenderer(renderer: *mut SDL_Renderer);
    pub fn SDL_GetRendererInfo(renderer: *mut SDL_Renderer, info: *mut RendererInfo) -> c_int;
    pub fn SDL_SetRenderDrawColor(renderer: *mut SDL_Renderer, r: u8, g: u8, b: u8, a: u8)
        -> c_int;
    pub fn SDL_GetRenderDrawColor(
        renderer: *mut SDL_Renderer,
        r: *mut u8,
        g: *mut u8,
        b: *mut u8,
        a: *mut u8,
    ) -> c_int;
    pub fn SDL_RenderClear(renderer: *mut SDL_Renderer) -> c_int;
    pub fn SDL_RenderPresent(renderer: *mut SDL_Renderer);
    pub fn SDL_RenderDrawPoint(renderer: *mut SDL_Renderer, x: c_int, y: c_int) -> c_int;
    pub fn SDL_RenderDrawLine(
        renderer: *mut SDL_Renderer,
        x1: c_int,
        y1: c_int,
        x2: c_int,
        y2: c_int,
    ) -> c_int;
    pub fn SDL_RenderDrawRect(renderer: *mut SDL_Renderer, rect: *const Rect) -> c_int;
    pub fn SDL_RenderFillRect(renderer: *mut SDL_Renderer, rect: *const Rect) -> c_int;
    pub fn SDL_RenderSetViewport(renderer: *mut SDL_Renderer, rect: *const Rect) -> c_int;
    pub fn SDL_RenderGetViewport(renderer: *mut SDL_Renderer, rect: *mut Rect);
    pub fn SDL_RenderSetScale(renderer: *mut SDL_Renderer, scale_x: f32, scale_y: f32) -> c_int;
    pub fn SDL_RenderSetLogicalSize(renderer: *mut SDL_Renderer, w: c_int, h: c_int) -> c_int;
    pub fn SDL_RenderCopy(
        renderer: *mut SDL_Renderer,
        texture: *mut SDL_Texture,
        srcrect: *const Rect,
        dstrect: *const Rect,
    ) -> c_int;
    pub fn SDL_RenderCopyEx(
        renderer: *mut SDL_Renderer,
        texture: *mut SDL_Texture,
        srcrect: *const Rect,
        dstrect: *const Rect,
        angle: f64,
        center: *const Point,
        flip: c_int,
    ) -> c_int;
    pub fn SDL_CreateTexture(
        renderer: *mut SDL_Renderer,
        format: u32,
        access: c_int,
        w: c_int,
        h: c_int,
    ) -> *mut SDL_Texture;
    pub fn SDL_CreateTextureFromSurface(renderer: *mut SDL_Renderer, surface: *mut Surface)
        -> *mut SDL_Texture;
    pub fn SDL_DestroyTexture(texture: *mut SDL_Texture);
    pub fn SDL_QueryTexture(
        texture: *mut SDL_Texture,
        format: *mut u32,
        access: *mut c_int,
        w: *mut c_int,
        h: *mut c_int,
    ) -> c_int;
    pub fn SDL_SetTextureColorMod(texture: *mut SDL_Texture, r: u8, g: u8, b: u8) -> c_int;
    pub fn SDL_SetTextureAlphaMod(texture: *mut SDL_Texture, alpha: u8) -> c_int;
    pub fn SDL_SetTextureBlendMode(texture: *mut SDL_Texture, blend_mode: c_int) -> c_int;
    pub fn SDL_UpdateTexture(
        texture: *mut SDL_Texture,
        rect: *const Rect,
        pixels: *const c_void,
        pitch: c_int,
    ) -> c_int;

    // SDL_surface.h
    pub fn SDL_CreateRGBSurface(
        flags: u32,
        width: c_int,
        height: c_int,
        depth: c_int,
        rmask: u32,
        gmask: u32,
        bmask: u32,
        amask: u32,
    ) -> *mut Surface;
    pub fn SDL_CreateRGBSurfaceFrom(
        pixels: *mut c_void,
        width: c_int,
        height: c_int,
        depth: c_int,
        pitch: c_int,
        rmask: u32,
        gmask: u32,
        bmask: u32,
        amask: u32,
    ) -> *mut Surface;
    pub fn SDL_FreeSurface(surface: *mut Surface);
    pub fn SDL_LockSurface(surface: *mut Surface) -> c_int;
    pub fn SDL_UnlockSurface(surface: *mut Surface);
    pub fn SDL_SetSurfacePalette(surface: *mut Surface, palette: *mut Palette) -> c_int;
    pub fn SDL_FillRect(dst: *mut Surface, rect: *const Rect, color: u32) -> c_int;
    pub fn SDL_SetColorKey(surface: *mut Surface, flag: c_int, key: u32) -> c_int;
    pub fn SDL_GetColorKey(surface: *mut Surface, key: *mut u32) -> c_int;
    pub fn SDL_SetSurfaceAlphaMod(surface: *mut Surface, alpha: u8) -> c_int;
    pub fn SDL_UpperBlit(
        src: *mut Surface,
        srcrect: *const Rect,
        dst: *mut Surface,
        dstrect: *mut Rect,
    ) -> c_int;

    // SDL_pixels.h
    pub fn SDL_GetPixelFormatName(format: u32) -> *const c_char;
    pub fn SDL_AllocFormat(pixel_format: u32) -> *mut PixelFormat;
    pub fn SDL_FreeFormat(format: *mut PixelFormat);
    pub fn SDL_AllocPalette(ncolors: c_int) -> *mut Palette;
    pub fn SDL_FreePalette(palette: *mut Palette);
    pub fn SDL_SetPaletteColors(
        palette: *mut Palette,
        colors: *const Color,
        firstcolor: c_int,
        ncolors: c_int,
    ) -> c_int;
    pub fn SDL_SetPixelFormatPalette(format: *mut PixelFormat, palette: *mut Palette) -> c_int;
    pub fn SDL_MapRGB(format: *const PixelFormat, r: u8, g: u8, b: u8) -> u32;
    pub fn SDL_MapRGBA(format: *const PixelFormat, r: u8, g: u8, b: u8, a: u8) -> u32;
    pub fn SDL_GetRGB(pixel: u32, format: *const PixelFormat, r: *mut u8, g: *mut u8, b: *mut u8);
    pub fn SDL_GetRGBA(
        pixel: u32,
        format: *const PixelFormat,
        r: *mut u8,
        g: *mut u8,
        b: *mut u8,
        a: *mut u8,
    );

    // SDL_mouse.h
    pub fn SDL_CreateSystemCursor(id: c_int) -> *mut SDL_Cursor;
    pub fn SDL_CreateColorCursor(surface: *mut Surface, hot_x: c_int, hot_y: c_int)
        -> *mut SDL_Cursor;
    pub fn SDL_SetCursor(cursor: *mut SDL_Cursor);
    pub fn SDL_FreeCursor(cursor: *mut SDL_Cursor);
    pub fn SDL_GetMouseState(x: *mut c_int, y: *mut c_int) -> u32;
    pub fn SDL_GetRelativeMouseState(x: *mut c_int, y: *mut c_int) -> u32;
    pub fn SDL_ShowCursor(toggle: c_int) -> c_int;
    pub fn SDL_SetRelativeMouseMode(enabled: SDL_bool) -> c_int;
    pub fn SDL_GetRelativeMouseMode() -> SDL_bool;
    pub fn SDL_GetMouseFocus() -> *mut SDL_Window;
    pub fn SDL_WarpMouseInWindow(window: *mut SDL_Window, x: c_int, y: c_int);
    pub fn SDL_CreateCursor(
        data: *const u8,
        mask: *const u8,
        w: c_int,
        h: c_int,
        hot_x: c_int,
        hot_y: c_int,
    ) -> *mut SDL_Cursor;
    pub fn SDL_GetCursor() -> *mut SDL_Cursor;

    // SDL_rect.h
    pub fn SDL_HasIntersection(a: *const Rect, b: *const Rect) -> SDL_bool;
    pub fn SDL_IntersectRect(a: *const Rect, b: *const Rect, result: *mut Rect) -> SDL_bool;
    pub fn SDL_UnionRect(a: *const Rect, b: *const Rect, result: *mut Rect);
    pub fn SDL_EnclosePoints(
        points: *const Point,
        count: c_int,
        clip: *const Rect,
        result: *mut Rect,
    ) -> SDL_bool;
    pub fn SDL_IntersectRectAndLine(
        rect: *const Rect,
        x1: *mut c_int,
        y1: *mut c_int,
        x2: *mut c_int,
        y2: *mut c_int,
    ) -> SDL_bool;

    // SDL_messagebox.h
    pub fn SDL_ShowMessageBox(data: *const MessageBoxData, buttonid: *mut c_int) -> c_int;
    pub fn SDL_ShowSimpleMessageBox(
        flags: u32,
        title: *const c_char,
        message: *const c_char,
        window: *mut SDL_Window,
    ) -> c_int;

    // SDL_syswm.h
    pub fn SDL_GetWindowWMInfo(window: *mut SDL_Window, info: *mut SysWMinfo) -> SDL_bool;

    // SDL_keyboard.h
    pub fn SDL_GetKeyboardState(numkeys: *mut c_int) -> *const u8;
    pub fn SDL_GetModState() -> c_int;
    pub fn SDL_GetScancodeName(scancode: c_int) -> *const c_char;
    pub fn SDL_GetKeyName(key: i32) -> *const c_char;
    pub fn SDL_GetKeyFromName(name: *const c_char) -> i32;
    pub fn SDL_StartTextInput();
    pub fn SDL_StopTextInput();
    pub fn SDL_IsTextInputActive() -> SDL_bool;

    // SDL_joystick.h
    pub fn SDL_NumJoysticks() -> c_int;
    pub fn SDL_JoystickNameForIndex(device_index: c_int) -> *const c_char;
    pub fn SDL_JoystickOpen(device_index: c_int) -> *mut SDL_Joystick;
    pub fn SDL_JoystickClose(joystick: *mut SDL_Joystick);
    pub fn SDL_JoystickName(joystick: *mut SDL_Joystick) -> *const c_char;
    pub fn SDL_JoystickInstanceID(joystick: *mut SDL_Joystick) -> i32;
    pub fn SDL_JoystickNumAxes(joystick: *mut SDL_Joystick) -> c_int;
    pub fn SDL_JoystickNumBalls(joystick: *mut SDL_Joystick) -> c_int;
    pub fn SDL_JoystickNumHats(joystick: *mut SDL_Joystick) -> c_int;
    pub fn SDL_JoystickNumButtons(joystick: *mut SDL_Joystick) -> c_int;
    pub fn SDL_JoystickGetAxis(joystick: *mut SDL_Joystick, axis: c_int) -> i16;
    pub fn SDL_JoystickGetHat(joystick: *mut SDL_Joystick, hat: c_int) -> u8;
    pub fn SDL_JoystickGetButton(joystick: *mut SDL_Joystick, button: c_int) -> u8;
    pub fn SDL_JoystickGetGUID(joystick: *mut SDL_Joystick) -> JoystickGUID;
    pub fn SDL_JoystickGetGUIDString(guid: JoystickGUID, psz_guid: *mut c_char, cb_guid: c_int);
    pub fn SDL_JoystickUpdate();

    // SDL_gamecontroller.h
    pub fn SDL_IsGameController(joystick_index: c_int) -> SDL_bool;
    pub fn SDL_GameControllerAddMapping(mapping: *const c_char) -> c_int;
    pub fn SDL_GameControllerOpen(joystick_index: c_int) -> *mut SDL_GameController;
    pub fn SDL_GameControllerClose(controller: *mut SDL_GameController);
    pub fn SDL_GameControllerName(controller: *mut SDL_GameController) -> *const c_char;
    pub fn SDL_GameControllerGetAttached(controller: *mut SDL_GameController) -> SDL_bool;
    pub fn SDL_GameControllerGetAxis(controller: *mut SDL_GameController, axis: c_int) -> i16;
    pub fn SDL_GameControllerGetButton(controller: *mut SDL_GameController, button: c_int) -> u8;
    pub fn SDL_GameControllerGetJoystick(controller: *mut SDL_GameController)
        -> *mut SDL_Joystick;

    // SDL_rwops.h
    pub fn SDL_RWFromFile(file: *const c_char, mode: *const c_char) -> *mut SDL_RWops;
    pub fn SDL_RWFromConstMem(mem: *const c_void, size: c_int) -> *mut SDL_RWops;

    // SDL_ttf.h
    pub fn TTF_Linked_Version() -> *const Version;
    pub fn TTF_Init() -> c_int;
    pub fn TTF_Quit();
    pub fn TTF_WasInit() -> c_int;
    pub fn TTF_OpenFont(file: *const c_char, ptsize: c_int) -> *mut TTF_Font;
    pub fn TTF_OpenFontIndex(file: *const c_char, ptsize: c_int, index: c_long) -> *mut TTF_Font;
    pub fn TTF_CloseFont(font: *mut TTF_Font);
    pub fn TTF_GetFontStyle(font: *const TTF_Font) -> c_int;
    pub fn TTF_SetFontStyle(font: *mut TTF_Font, style: c_int);
    pub fn TTF_GetFontOutline(font: *const TTF_Font) -> c_int;
    pub fn TTF_SetFontOutline(font: *mut TTF_Font, outline: c_int);
    pub fn TTF_GetFontHinting(font: *const TTF_Font) -> c_int;
    pub fn TTF_SetFontHinting(font: *mut TTF_Font, hinting: c_int);
    pub fn TTF_FontHeight(font: *const TTF_Font) -> c_int;
    pub fn TTF_FontAscent(font: *const TTF_Font) -> c_int;
    pub fn TTF_FontDescent(font: *const TTF_Font) -> c_int;
    pub fn TTF_FontLineSkip(font: *const TTF_Font) -> c_int;
    pub fn TTF_GetFontKerning(font: *const TTF_Font) -> c_int;
    pub fn TTF_SetFontKerning(font: *mut TTF_Font, allowed: c_int);
    pub fn TTF_FontFaces(font: *const TTF_Font) -> c_long;
    pub fn TTF_FontFaceIsFixedWidth(font: *const TTF_Font) -> c_int;
    pub fn TTF_FontFaceFamilyName(font: *const TTF_Font) -> *mut c_char;
    pub fn TTF_FontFaceStyleName(font: *const TTF_Font) -> *mut c_char;
    pub fn TTF_GlyphMetrics(
        font: *mut TTF_Font,
        ch: u16,
        minx: *mut c_int,
        maxx: *mut c_int,
        miny: *mut c_int,
        maxy: *mut c_int,
        advance: *mut c_int,
    ) -> c_int;
    pub fn TTF_SizeUTF8(font: *mut TTF_Font, text: *const c_char, w: *mut c_int, h: *mut c_int)
        -> c_int;
    pub fn TTF_RenderUTF8_Solid(font: *mut TTF_Font, text: *const c_char, fg: Color)
        -> *mut Surface;
    pub fn TTF_RenderUTF8_Shaded(
        font: *mut TTF_Font,
        text: *const c_char,
        fg: Color,
        bg: Color,
    ) -> *mut Surface;
    pub fn TTF_RenderUTF8_Blended(font: *mut TTF_Font, text: *const c_char, fg: Color)
        -> *mut Surface;
    pub fn TTF_RenderUTF8_Blended_Wrapped(
        font: *mut TTF_Font,
        text: *const c_char,
        fg: Color,
        wrap_length: u32,
    ) -> *mut Surface;

    // SDL_mixer.h
    pub fn Mix_Linked_Version() -> *const Version;
    pub fn Mix_Init(flags: c_int) -> c_int;
    pub fn Mix_Quit();
    pub fn Mix_OpenAudio(frequency: c_int, format: u16, channels: c_int, chunksize: c_int)
        -> c_int;
    pub fn Mix_CloseAudio();
    pub fn Mix_QuerySpec(frequency: *mut c_int, format: *mut u16, channels: *mut c_int) -> c_int;
    pub fn Mix_AllocateChannels(numchans: c_int) -> c_int;
    pub fn Mix_LoadWAV_RW(src: *mut SDL_RWops, freesrc: c_int) -> *mut MixChunk;
    pub fn Mix_FreeChunk(chunk: *mut MixChunk);
    pub fn Mix_VolumeChunk(chunk: *mut MixChunk, volume: c_int) -> c_int;
    pub fn Mix_LoadMUS(file: *const c_char) -> *mut Mix_Music;
    pub fn Mix_FreeMusic(music: *mut Mix_Music);
    pub fn Mix_GetMusicType(music: *const Mix_Music) -> c_int;
    pub fn Mix_PlayMusic(music: *mut Mix_Music, loops: c_int) -> c_int;
    pub fn Mix_PlayChannelTimed(
        channel: c_int,
        chunk: *mut MixChunk,
        loops: c_int,
        ticks: c_int,
    ) -> c_int;
    pub fn Mix_HaltChannel(channel: c_int) -> c_int;
    pub fn Mix_HaltMusic() -> c_int;
    pub fn Mix_Volume(channel: c_int, volume: c_int) -> c_int;
    pub fn Mix_VolumeMusic(volume: c_int) -> c_int;
    pub fn Mix_Pause(channel: c_int);
    pub fn Mix_Resume(channel: c_int);
    pub fn Mix_Playing(channel: c_int) -> c_int;
    pub fn Mix_PlayingMusic() -> c_int;
    pub fn Mix_FadingMusic() -> c_int;
}
