use partwizard_core::symmetry::{create_symmetry, symmetry_report};
use partwizard_core::vessel::{HeadlessHost, PartId, PartInfo, Vessel};
use partwizard_editor::part_list::{RowButton, RowClick, RowHover, RowTarget};
use partwizard_editor::settings::DEFAULT_SETTINGS_PATH;
use partwizard_editor::symmetry_editor::SymmetryAction;
use partwizard_editor::{EditorResult, FrameInput, PartWizard, Screen, SettingsStore, logging};

/// A pod with four radial decouplers, each carrying a fuel tank.
fn build_vessel() -> EditorResult<(Vessel, Vec<PartId>)> {
    let mut vessel = Vessel::new();
    let pod = vessel.add_root(PartInfo::new("mk1pod").with_title("Mk1 Command Pod"))?;
    let mut decouplers = Vec::new();
    let mut tanks = Vec::new();
    for _ in 0..4 {
        let decoupler =
            vessel.add_child(pod, PartInfo::new("radialDecoupler").with_title("Radial Decoupler"))?;
        tanks.push(vessel.add_child(decoupler, PartInfo::new("fuelTank").with_title("FL-T400"))?);
        decouplers.push(decoupler);
    }
    create_symmetry(&mut vessel, decouplers[0], &decouplers[1..])?;
    create_symmetry(&mut vessel, tanks[0], &tanks[1..])?;
    Ok((vessel, decouplers))
}

fn print_frame(
    app: &mut PartWizard,
    vessel: &mut Vessel,
    host: &mut HeadlessHost,
    input: &FrameInput,
) -> EditorResult {
    let frames = app.render(vessel, host, input)?;
    if let Some(list) = frames.part_list.body() {
        for row in &list.rows {
            log::info!(
                "  {:<20} break={:<5} delete={}",
                row.title,
                row.break_enabled,
                row.delete_enabled
            );
        }
        log::info!("  {}", list.status);
    }
    if let Some(editor) = frames.symmetry_editor.body() {
        log::info!("  {}", editor.title);
        for group in &editor.groups {
            log::info!("    {}: {} parts", group.name, group.parts.len());
        }
    }
    Ok(())
}

fn run() -> EditorResult {
    let settings = SettingsStore::load_or_default(DEFAULT_SETTINGS_PATH);
    let mut app = PartWizard::new(settings, Screen::new(1920.0, 1080.0))?;
    let (mut vessel, decouplers) = build_vessel()?;
    let mut host = HeadlessHost::new();

    app.toggle_visibility(&mut vessel)?;
    log::info!("Part list:");
    print_frame(&mut app, &mut vessel, &mut host, &FrameInput::default())?;

    log::info!("Opening the symmetry editor on {}:", decouplers[0]);
    let mut input = FrameInput::default();
    input.part_list.mouse_over_window = true;
    input.part_list.hovered = Some(RowHover {
        part: decouplers[0],
        target: RowTarget::BreakSymmetry,
    });
    input.part_list.clicked = Some(RowClick {
        part: decouplers[0],
        button: RowButton::BreakSymmetry,
    });
    print_frame(&mut app, &mut vessel, &mut host, &input)?;

    log::info!("Splitting the family into two pairs:");
    let mut input = FrameInput::default();
    input.symmetry_editor.action = Some(SymmetryAction::MoveUp {
        group: 1,
        part: decouplers[1],
    });
    print_frame(&mut app, &mut vessel, &mut host, &input)?;
    input.symmetry_editor.action = Some(SymmetryAction::MoveDown {
        group: 2,
        part: decouplers[2],
    });
    print_frame(&mut app, &mut vessel, &mut host, &input)?;
    input.symmetry_editor.action = Some(SymmetryAction::Ok);
    print_frame(&mut app, &mut vessel, &mut host, &input)?;

    for &decoupler in &decouplers {
        log::info!("{}", symmetry_report(&vessel, decoupler)?);
    }

    app.shutdown(&mut vessel)
}

fn main() {
    logging::install();
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
