use std::io::{self, BufRead, Write};

pub const CONTINUE_QUESTION: &str = "Do you want to continue with the action?";

/// Ask a yes/no question; anything but `y` or `yes` is a refusal
///
/// End of input counts as "no" so a push from a non-interactive session is
/// never confirmed by accident.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool> {
    write!(output, "{} [y/N]: ", question)?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Disclaimer shown before pushing to a remote outside the allow-list
pub fn write_disclaimer<W: Write>(output: &mut W, disclaimer: &str, remote: &str) -> io::Result<()> {
    write!(output, "\n\n")?;
    writeln!(output, "{}", disclaimer)?;
    writeln!(output)?;
    writeln!(output, "Git Remote: {:?}", remote)
}

/// Warning shown before pushing to a protected branch
pub fn write_protected_branch_warning<W: Write>(output: &mut W, branch: &str) -> io::Result<()> {
    writeln!(
        output,
        "You are attempting to push to the protected branch: \"{}\"",
        branch
    )
}
