use wasmbuild_core::StageCommand;

pub fn print_command_breakdown(command: &StageCommand) {
    println!("📦 Stage: {}", command.stage);
    println!("   🔧 Command breakdown:");
    println!("      • command: {}", command.program);

    if let Some(subcommand) = command.args.first().filter(|a| !a.starts_with('-')) {
        println!("      • subcommand: {}", subcommand);
    }

    let flags: Vec<_> = command
        .args
        .iter()
        .skip(1)
        .filter(|a| a.starts_with('-'))
        .collect();
    if !flags.is_empty() {
        println!("      • flags: {:?}", flags);
    }

    if let Some(ref dir) = command.working_dir {
        println!("      • workingDir: {}", dir.display());
    }

    if !command.env.is_empty() {
        println!("      • extraEnv:");
        for (key, value) in &command.env {
            println!("         - {}={}", key, value);
        }
    }

    println!("   🚀 Final command: {}", command.to_shell_command());
}
